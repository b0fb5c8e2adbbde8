use crate::classify::ParamClassifier;

/// Position-wise similarity between a stored template and an incoming
/// tokenization of the same length.
///
/// Returns the matched fraction and the number of placeholder positions.
/// With `include_params`, placeholder positions count as matches, which is
/// the perfect-match discipline used by read-only lookups. Panics when the
/// lengths differ; callers reach this through the length-indexed tree.
pub fn sequence_similarity(
    classifier: &ParamClassifier,
    template: &[String],
    incoming: &[String],
    include_params: bool,
) -> (f64, usize) {
    assert_eq!(
        template.len(),
        incoming.len(),
        "sequences must be of the same length"
    );

    let mut matched = 0usize;
    let mut param_count = 0usize;
    for (kept, seen) in template.iter().zip(incoming) {
        if classifier.is_label(kept) {
            param_count += 1;
        } else if kept == seen {
            matched += 1;
        }
    }
    if include_params {
        matched += param_count;
    }
    (matched as f64 / template.len() as f64, param_count)
}

/// Folds an incoming tokenization into a template of the same length.
///
/// Agreeing positions and placeholder slots are kept. A literal slot that
/// disagrees is generalized by classifying the token it used to hold, which
/// collapses the slot to the empty sentinel when no pattern accepts it.
/// Panics when the lengths differ.
pub fn merge_template(
    classifier: &ParamClassifier,
    template: &[String],
    incoming: &[String],
) -> Vec<String> {
    assert_eq!(
        template.len(),
        incoming.len(),
        "sequences must be of the same length"
    );

    template
        .iter()
        .zip(incoming)
        .map(|(kept, seen)| {
            if kept == seen || classifier.is_label(kept) {
                kept.clone()
            } else {
                classifier.classify(kept).to_owned()
            }
        })
        .collect()
}
