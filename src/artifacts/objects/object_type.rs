use crate::errors::{Result, StoreError};

/// Separator between the type tag and the payload of a stored record.
pub const TYPE_SEPARATOR: u8 = b'\0';

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObjectType {
    Blob,
    Tree,
    Commit,
}

impl ObjectType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ObjectType::Blob => "blob",
            ObjectType::Tree => "tree",
            ObjectType::Commit => "commit",
        }
    }

    /// Build the on-disk record: `<tag> 0x00 <payload>`.
    pub fn frame(&self, payload: &[u8]) -> Vec<u8> {
        let tag = self.as_str().as_bytes();
        let mut record = Vec::with_capacity(tag.len() + 1 + payload.len());
        record.extend_from_slice(tag);
        record.push(TYPE_SEPARATOR);
        record.extend_from_slice(payload);
        record
    }

    /// Split a stored record into its type tag and payload.
    pub fn unframe(record: &[u8]) -> Result<(ObjectType, &[u8])> {
        let separator = record
            .iter()
            .position(|byte| *byte == TYPE_SEPARATOR)
            .ok_or_else(|| StoreError::CorruptRecord("missing type separator".to_string()))?;

        let tag = String::from_utf8_lossy(&record[..separator]);
        let object_type = ObjectType::try_from(tag.as_ref())
            .map_err(|_| StoreError::CorruptRecord(format!("unknown type tag {tag:?}")))?;

        Ok((object_type, &record[separator + 1..]))
    }
}

impl TryFrom<&str> for ObjectType {
    type Error = StoreError;

    fn try_from(value: &str) -> Result<Self> {
        match value {
            "blob" => Ok(ObjectType::Blob),
            "tree" => Ok(ObjectType::Tree),
            "commit" => Ok(ObjectType::Commit),
            _ => Err(StoreError::UnknownEntryType {
                tag: value.to_string(),
            }),
        }
    }
}

impl std::fmt::Display for ObjectType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frame_prefixes_tag_and_separator() {
        assert_eq!(ObjectType::Blob.frame(b"hi"), b"blob\0hi".to_vec());
    }

    #[test]
    fn unframe_splits_on_first_separator_only() {
        let (object_type, payload) = ObjectType::unframe(b"commit\0a\0b").unwrap();
        assert_eq!(object_type, ObjectType::Commit);
        assert_eq!(payload, b"a\0b");
    }

    #[test]
    fn unframe_rejects_unknown_tag() {
        assert!(matches!(
            ObjectType::unframe(b"tag\0x"),
            Err(StoreError::CorruptRecord(_))
        ));
    }
}
