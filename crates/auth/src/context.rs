//! Request-scoped security context

use std::sync::Arc;

use crate::principal::Principal;

/// Who is making the current request.
///
/// Lives in the request's extensions, so each request owns its own copy and
/// nothing is shared between concurrent requests. The authorization gate
/// installs it on success and clears it on any failure.
#[derive(Debug, Clone, Default)]
pub struct SecurityContext {
    principal: Option<Arc<Principal>>,
}

impl SecurityContext {
    pub fn authenticated(principal: Principal) -> Self {
        Self {
            principal: Some(Arc::new(principal)),
        }
    }

    pub fn principal(&self) -> Option<&Arc<Principal>> {
        self.principal.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.principal.is_some()
    }

    pub fn clear(&mut self) {
        self.principal = None;
    }
}
