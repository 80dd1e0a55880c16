use serde::Serialize;

use poa_session::jwt::decode_expiry;
use poa_session::{Phase, Session, Trust, Verification};

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

#[derive(Debug, Serialize)]
struct StatusResponse {
    authenticated: bool,
    phase: &'static str,
    trust: Option<&'static str>,
    username: Option<String>,
    name: Option<String>,
    role: Option<String>,
    token_source: Option<String>,
    expires_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    verification: Option<String>,
}

pub async fn handle(verify: bool, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let mut session = ctx.session.initialize().await;

    let verification = if verify {
        let result = ctx.session.verify().await;
        session = ctx.session.snapshot();
        Some(verification_label(&result))
    } else {
        None
    };

    let expires_at = ctx
        .client()
        .token()
        .and_then(|token| decode_expiry(&token).ok())
        .map(|expiry| expiry.to_rfc3339());

    output(
        &StatusResponse {
            authenticated: session.is_authenticated(),
            phase: phase_label(&session),
            trust: session.trust().map(trust_label),
            username: session.user().map(|user| user.username.clone()),
            name: session.user().map(poa_core::entities::User::display_name),
            role: session.user().map(|user| user.role.to_string()),
            token_source: ctx.session.token_source().map(|source| source.to_string()),
            expires_at,
            verification,
        },
        flags.format,
    )
}

const fn phase_label(session: &Session) -> &'static str {
    match session.phase() {
        Phase::Uninitialized => "uninitialized",
        Phase::Initializing => "initializing",
        Phase::Authenticated => "authenticated",
        Phase::Unauthenticated => "unauthenticated",
    }
}

const fn trust_label(trust: Trust) -> &'static str {
    match trust {
        Trust::Unverified => "unverified",
        Trust::Verified => "verified",
    }
}

fn verification_label(result: &Verification) -> String {
    match result {
        Verification::Verified(_) => "verified".into(),
        Verification::Rejected => "rejected".into(),
        Verification::Unavailable(reason) => format!("unavailable: {reason}"),
        Verification::NoToken => "no token".into(),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn anonymous_session_labels() {
        let session = Session::anonymous();
        assert_eq!(phase_label(&session), "uninitialized");
        assert_eq!(session.trust().map(trust_label), None);
    }

    #[test]
    fn unavailable_verification_keeps_reason() {
        let label = verification_label(&Verification::Unavailable("timed out".into()));
        assert_eq!(label, "unavailable: timed out");
    }
}
