//! Run-sequence signatures

/// Separator between run values in a signature
pub const SIGNATURE_SEPARATOR: &str = "-";

/// Join run values into a signature, e.g. `[1, 4, 0]` -> `"1-4-0"`.
///
/// An empty sequence gives an empty signature.
pub fn signature<I>(runs: I) -> String
where
    I: IntoIterator<Item = i32>,
{
    runs.into_iter()
        .map(|r| r.to_string())
        .collect::<Vec<_>>()
        .join(SIGNATURE_SEPARATOR)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signature_of_an_over() {
        assert_eq!(signature([1, 4, 0, 6, 0, 2]), "1-4-0-6-0-2");
    }

    #[test]
    fn test_signature_keeps_wicket_sign() {
        assert_eq!(signature([-1, 2]), "-1-2");
    }

    #[test]
    fn test_empty_signature() {
        assert_eq!(signature(Vec::<i32>::new()), "");
    }
}
