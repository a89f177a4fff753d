use std::future::Future;

/// Apply a visible mutation before its durable write is confirmed.
///
/// `apply` runs first, then `commit` is awaited. If the commit fails,
/// `revert` undoes `apply` and the commit error is returned. Exactly one
/// commit is attempted and `revert` runs at most once.
pub async fn apply_with_rollback<T, E, Fut>(
    apply: impl FnOnce(),
    commit: impl FnOnce() -> Fut,
    revert: impl FnOnce(),
) -> Result<T, E>
where
    Fut: Future<Output = Result<T, E>>,
{
    apply();
    match commit().await {
        Ok(value) => Ok(value),
        Err(err) => {
            revert();
            Err(err)
        }
    }
}
