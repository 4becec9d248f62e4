//! Expansion of (identifier, quantity) pairs into individual labels

/// One physical label to draw
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelInstance<'a> {
    pub text: &'a str,
    /// Position within the flattened job
    pub index: usize,
}

/// Flatten pairs into one instance per printed label.
///
/// Copies of an identifier stay contiguous and identifiers keep their input
/// order.
pub fn expand<S: AsRef<str>>(pairs: &[(S, u32)]) -> Vec<LabelInstance<'_>> {
    let total = total_labels(pairs);
    let mut instances = Vec::with_capacity(total);

    for (text, quantity) in pairs {
        for _ in 0..*quantity {
            instances.push(LabelInstance {
                text: text.as_ref(),
                index: instances.len(),
            });
        }
    }

    instances
}

/// Number of labels a job expands to
pub fn total_labels<S>(pairs: &[(S, u32)]) -> usize {
    pairs.iter().map(|(_, quantity)| *quantity as usize).sum()
}
