use crate::{
    conf::settings,
    pkg::internal::auth::{Caller, TokenAuthority},
    prelude::Result,
};

pub fn mint(user_id: &str, name: &str) -> Result<()> {
    let authority = TokenAuthority::new(&settings.jwt_secret, settings.jwt_lifetime_hours);
    let caller = Caller {
        user_id: user_id.to_string(),
        name: name.to_string(),
    };
    let token = authority.issue(&caller)?;
    tracing::info!("issued token for {}", &caller.user_id);
    println!("{token}");
    Ok(())
}
