use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use crate::errors::Result;
use bytes::Bytes;

/// Serialize an object into its raw payload (no type tag).
pub trait Packable {
    fn serialize(&self) -> Bytes;
}

pub trait Unpackable {
    fn deserialize(payload: Bytes) -> Result<Self>
    where
        Self: Sized;
}

pub trait Object: Packable {
    fn object_type(&self) -> ObjectType;

    /// The id is the digest of the payload alone; the type tag is not hashed.
    fn object_id(&self) -> ObjectId {
        ObjectId::hash(&self.serialize())
    }
}
