use uuid::Uuid;

use crate::IdGenerator;

/// Random (v4) UUID identifiers, hyphenated lowercase.
#[derive(Clone, Copy, Debug, Default)]
pub struct UuidGenerator;

impl IdGenerator for UuidGenerator {
    fn generate_id(&self) -> String {
        Uuid::new_v4().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generates_distinct_parseable_ids() {
        let generator = UuidGenerator;
        let first = generator.generate_id();
        let second = generator.generate_id();

        assert_ne!(first, second);
        assert!(Uuid::parse_str(&first).is_ok());
        assert_eq!(first, first.to_lowercase());
    }
}
