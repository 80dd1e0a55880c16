use poa_core::entities::User;

use crate::context::{AppContext, LOGIN_HINT};

/// Resolve the signed-in user, reconciling the stored session first.
pub async fn require_user(ctx: &AppContext) -> anyhow::Result<User> {
    let session = ctx.session.initialize().await;
    session
        .user()
        .cloned()
        .ok_or_else(|| anyhow::anyhow!("not signed in. {LOGIN_HINT}"))
}

/// Like [`require_user`], and the user must be an administrator.
pub async fn require_admin(ctx: &AppContext) -> anyhow::Result<User> {
    let user = require_user(ctx).await?;
    if !user.is_admin() {
        anyhow::bail!(
            "'{}' has role {}; this command requires role Administrador",
            user.username,
            user.role
        );
    }
    Ok(user)
}
