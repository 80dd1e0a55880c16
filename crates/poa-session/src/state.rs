//! In-memory session state.
//!
//! An authenticated session always carries its user: the two travel
//! together in [`SignedIn`], so "authenticated without a user" cannot be
//! represented.

use poa_core::entities::User;

/// How far the current session has been confirmed by the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trust {
    /// Restored from storage; not yet confirmed.
    Unverified,
    /// Confirmed by a login or a current-user check in this process.
    Verified,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Uninitialized,
    Initializing,
    Authenticated,
    Unauthenticated,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedIn {
    pub user: User,
    pub trust: Trust,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stage {
    /// Constructed (and rehydrated) but `initialize()` has not finished.
    Fresh,
    Initializing,
    Ready,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    signed_in: Option<SignedIn>,
    stage: Stage,
}

impl Default for Session {
    fn default() -> Self {
        Self::anonymous()
    }
}

impl Session {
    /// Empty session awaiting initialization.
    #[must_use]
    pub const fn anonymous() -> Self {
        Self {
            signed_in: None,
            stage: Stage::Fresh,
        }
    }

    /// Session restored with an unverified user, awaiting initialization.
    #[must_use]
    pub const fn restored(user: User) -> Self {
        Self {
            signed_in: Some(SignedIn {
                user,
                trust: Trust::Unverified,
            }),
            stage: Stage::Fresh,
        }
    }

    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        self.signed_in.is_some()
    }

    #[must_use]
    pub fn user(&self) -> Option<&User> {
        self.signed_in.as_ref().map(|signed_in| &signed_in.user)
    }

    #[must_use]
    pub fn trust(&self) -> Option<Trust> {
        self.signed_in.as_ref().map(|signed_in| signed_in.trust)
    }

    /// True until the first `initialize()` run completes.
    #[must_use]
    pub fn is_initializing(&self) -> bool {
        self.stage != Stage::Ready
    }

    #[must_use]
    pub const fn phase(&self) -> Phase {
        match (self.stage, &self.signed_in) {
            (Stage::Initializing, _) => Phase::Initializing,
            (_, Some(_)) => Phase::Authenticated,
            (Stage::Fresh, None) => Phase::Uninitialized,
            (Stage::Ready, None) => Phase::Unauthenticated,
        }
    }

    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.user().is_some_and(User::is_admin)
    }

    pub(crate) fn sign_in(&mut self, user: User, trust: Trust) {
        self.signed_in = Some(SignedIn { user, trust });
    }

    pub(crate) fn sign_out(&mut self) {
        self.signed_in = None;
    }

    pub(crate) fn begin_initializing(&mut self) {
        self.stage = Stage::Initializing;
    }

    pub(crate) fn finish_initializing(&mut self) {
        self.stage = Stage::Ready;
    }

    /// Explicit login/logout settles a fresh session without waiting for
    /// `initialize()`; an in-flight run still owns the stage.
    pub(crate) fn settle(&mut self) {
        if self.stage == Stage::Fresh {
            self.stage = Stage::Ready;
        }
    }
}
