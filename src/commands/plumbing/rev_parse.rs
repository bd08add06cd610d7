use crate::areas::repository::Repository;
use crate::artifacts::branch::revision::Revision;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::Result;

impl Repository {
    /// Resolve a name or revision expression to an object id
    ///
    /// See [`Revision`] for the accepted forms. Before the first commit, `@`
    /// and `HEAD` resolve to nothing and fail with `UnknownName`.
    pub fn get_oid(&self, name: &str) -> Result<ObjectId> {
        Revision::try_parse(name)?.resolve(self)
    }
}
