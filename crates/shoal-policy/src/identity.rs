//! Impersonated execution for transfers that act on behalf of an object's
//! owner rather than the invoking process.

use tracing::debug;

use crate::error::PolicyResult;

/// Boundary trait for the external identity-switch primitive.
///
/// Implementations switch the privilege context of the current execution to
/// the given identity for the duration of `op` and must restore the original
/// context unconditionally, including when `op` fails. The switch is not
/// reentrant: overlapping operations must not share one execution context.
pub trait IdentitySwitch: Send + Sync {
    /// Run `op` under `identity`, restoring the caller context afterwards.
    ///
    /// # Errors
    ///
    /// Propagates the error returned by `op`, or an error of the switch
    /// itself when the context cannot be changed.
    fn run_as(
        &self,
        identity: &str,
        op: &mut dyn FnMut() -> PolicyResult<()>,
    ) -> PolicyResult<()>;
}

/// Runs a unit of work under a target user's privilege context, isolating
/// privilege elevation from the transfer logic.
pub struct ImpersonatedExecutor<'a, S: ?Sized> {
    switch: &'a S,
}

impl<'a, S: IdentitySwitch + ?Sized> ImpersonatedExecutor<'a, S> {
    /// Wrap an identity-switch primitive.
    #[must_use]
    pub const fn new(switch: &'a S) -> Self {
        Self { switch }
    }

    /// Execute `op`, impersonating `identity` when one is supplied.
    ///
    /// An absent or empty identity runs `op` under the caller's own identity
    /// with no context switch at all.
    ///
    /// # Errors
    ///
    /// Propagates the error returned by `op` or by the switch primitive.
    pub fn execute_as(
        &self,
        identity: Option<&str>,
        mut op: impl FnMut() -> PolicyResult<()>,
    ) -> PolicyResult<()> {
        match identity {
            Some(user) if !user.is_empty() => {
                debug!(user, "executing under impersonated identity");
                self.switch.run_as(user, &mut op)
            }
            _ => op(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    /// Records the identities it was asked to assume.
    #[derive(Default)]
    struct RecordingSwitch {
        assumed: Mutex<Vec<String>>,
    }

    impl IdentitySwitch for RecordingSwitch {
        fn run_as(
            &self,
            identity: &str,
            op: &mut dyn FnMut() -> PolicyResult<()>,
        ) -> PolicyResult<()> {
            self.assumed
                .lock()
                .unwrap_or_else(std::sync::PoisonError::into_inner)
                .push(identity.to_string());
            op()
        }
    }

    #[test]
    fn named_identity_routes_through_the_switch() {
        let switch = RecordingSwitch::default();
        let executor = ImpersonatedExecutor::new(&switch);

        executor
            .execute_as(Some("alice"), || Ok(()))
            .expect("operation succeeds");

        let assumed = switch
            .assumed
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        assert_eq!(assumed.as_slice(), &["alice".to_string()][..]);
    }

    #[test]
    fn absent_or_empty_identity_skips_the_switch() {
        let switch = RecordingSwitch::default();
        let executor = ImpersonatedExecutor::new(&switch);

        let mut runs = 0;
        executor
            .execute_as(None, || {
                runs += 1;
                Ok(())
            })
            .expect("operation succeeds");
        executor
            .execute_as(Some(""), || {
                runs += 1;
                Ok(())
            })
            .expect("operation succeeds");

        assert_eq!(runs, 2);
        let assumed = switch
            .assumed
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        assert!(assumed.is_empty());
    }

    #[test]
    fn operation_failures_propagate() {
        let switch = RecordingSwitch::default();
        let executor = ImpersonatedExecutor::new(&switch);

        let err = executor
            .execute_as(Some("alice"), || {
                Err(crate::error::PolicyError::transfer(-3, "failed"))
            })
            .expect_err("operation failed");
        assert_eq!(err.code(), Some(-3));
    }
}
