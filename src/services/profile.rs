use crate::domain::profile::Profile;
use crate::repository::ProfileReader;
use crate::services::ServiceResult;

/// Loads the account profile, falling back to zeroed counters when the
/// backend has no record.
pub async fn load_profile<R>(repo: &R) -> ServiceResult<Profile>
where
    R: ProfileReader + ?Sized,
{
    let profile = repo.get_profile().await.map_err(|e| {
        log::error!("Failed to fetch profile: {e}");
        e
    })?;
    Ok(profile.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::errors::RepositoryError;
    use crate::repository::mock::MockRepository;

    #[tokio::test]
    async fn missing_record_yields_defaults() {
        let mut repo = MockRepository::new();
        repo.expect_get_profile().times(1).returning(|| Ok(None));

        let profile = load_profile(&repo).await.unwrap();
        assert_eq!(profile, Profile::default());
        assert_eq!(profile.balance, "0");
    }

    #[tokio::test]
    async fn errors_are_propagated() {
        let mut repo = MockRepository::new();
        repo.expect_get_profile()
            .times(1)
            .returning(|| Err(RepositoryError::Network("down".into())));

        assert!(load_profile(&repo).await.is_err());
    }
}
