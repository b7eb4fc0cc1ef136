use mockall::mock;

use super::{DraftReader, DraftWriter, RepositoryResult};
use crate::domain::draft_session::{DraftKey, DraftSession};

mock! {
    pub DraftRepository {}

    impl DraftReader for DraftRepository {
        fn get_draft(&self, key: &DraftKey) -> RepositoryResult<Option<DraftSession>>;
    }

    impl DraftWriter for DraftRepository {
        fn store_draft(&self, session: &DraftSession) -> RepositoryResult<()>;
        fn discard_draft(&self, key: &DraftKey) -> RepositoryResult<Option<DraftSession>>;
    }
}
