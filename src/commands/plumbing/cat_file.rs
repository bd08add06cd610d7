use crate::areas::repository::Repository;
use crate::artifacts::objects::object_type::ObjectType;
use bytes::Bytes;

impl Repository {
    /// Payload of the object `name` resolves to, optionally type-checked
    pub fn cat_file(&self, name: &str, expected: Option<ObjectType>) -> crate::Result<Bytes> {
        let oid = self.get_oid(name)?;

        self.database().load(&oid, expected)
    }
}
