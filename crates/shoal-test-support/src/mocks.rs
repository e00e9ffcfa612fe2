//! Fake boundary collaborators with call recording.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use shoal_policy::{ConditionFlags, IdentitySwitch, PolicyError, PolicyResult, TransferPrimitive};

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// One recorded transfer primitive call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedSubmit {
    /// Object path handed to the primitive.
    pub object_path: String,
    /// Condition flags handed to the primitive.
    pub flags: ConditionFlags,
}

/// Transfer primitive fake with scripted per-resource return codes.
///
/// Every `submit` call is recorded in order. The returned code is looked up
/// by the call's destination resource (falling back to the source resource
/// for trims); unscripted resources succeed with 0.
#[derive(Clone, Default)]
pub struct MockTransferPrimitive {
    inner: Arc<MockTransferState>,
}

#[derive(Default)]
struct MockTransferState {
    scripted: Mutex<BTreeMap<String, i32>>,
    calls: Mutex<Vec<RecordedSubmit>>,
}

impl MockTransferPrimitive {
    /// Fake that succeeds for every resource.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Script the code returned when a call targets `resource`.
    pub fn script(&self, resource: &str, code: i32) {
        lock(&self.inner.scripted).insert(resource.to_string(), code);
    }

    /// Every `submit` call recorded so far, in order.
    #[must_use]
    pub fn calls(&self) -> Vec<RecordedSubmit> {
        lock(&self.inner.calls).clone()
    }

    /// Number of `submit` calls recorded so far.
    #[must_use]
    pub fn call_count(&self) -> usize {
        lock(&self.inner.calls).len()
    }
}

impl TransferPrimitive for MockTransferPrimitive {
    fn submit(&self, object_path: &str, flags: &ConditionFlags) -> i32 {
        lock(&self.inner.calls).push(RecordedSubmit {
            object_path: object_path.to_string(),
            flags: flags.clone(),
        });

        let resource = flags
            .destination_resource
            .clone()
            .or_else(|| flags.source_resource.clone())
            .unwrap_or_default();
        lock(&self.inner.scripted)
            .get(&resource)
            .copied()
            .unwrap_or(0)
    }
}

/// Identity switch fake recording every impersonation window.
///
/// Panics when entered reentrantly, mirroring the primitive's contract that
/// overlapping switches must not share one execution context.
#[derive(Clone, Default)]
pub struct MockIdentitySwitch {
    inner: Arc<MockIdentityState>,
}

#[derive(Default)]
struct MockIdentityState {
    assumed: Mutex<Vec<String>>,
    active: Mutex<bool>,
    fail_code: Mutex<Option<i32>>,
}

impl MockIdentitySwitch {
    /// Fake that passes every operation through under the given identity.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Identities assumed so far, in order.
    #[must_use]
    pub fn assumed(&self) -> Vec<String> {
        lock(&self.inner.assumed).clone()
    }

    /// Make every subsequent switch fail with a transfer error of `code`
    /// without running the operation.
    pub fn fail_with(&self, code: i32) {
        *lock(&self.inner.fail_code) = Some(code);
    }
}

impl IdentitySwitch for MockIdentitySwitch {
    fn run_as(
        &self,
        identity: &str,
        op: &mut dyn FnMut() -> PolicyResult<()>,
    ) -> PolicyResult<()> {
        {
            let mut active = lock(&self.inner.active);
            assert!(!*active, "identity switch entered reentrantly");
            *active = true;
        }
        lock(&self.inner.assumed).push(identity.to_string());

        let fail_code = *lock(&self.inner.fail_code);
        let result = if let Some(code) = fail_code {
            Err(PolicyError::Transfer {
                code,
                message: format!("identity switch to [{identity}] failed"),
            })
        } else {
            op()
        };

        *lock(&self.inner.active) = false;
        result
    }
}
