use anchor_lang::prelude::*;

use crate::{
    errors::ChonkError,
    events::{ConfigField, ConfigUpdated},
    state::Config,
    AddAuthorizedCaller, RemoveAuthorizedCaller,
    MAX_AUTHORIZED_CALLERS,
};

impl Config {
    pub fn require_authorized_caller(&self, caller: &Pubkey) -> Result<()> {
        require!(self.is_authorized_caller(caller), ChonkError::Unauthorized);
        Ok(())
    }

    pub fn add_authorized_caller(&mut self, caller: Pubkey) -> Result<()> {
        require!(caller != Pubkey::default(), ChonkError::CallerNotFound);
        require!(
            self.authorized_callers.len() < MAX_AUTHORIZED_CALLERS,
            ChonkError::CallerListFull
        );
        require!(
            !self.authorized_callers.contains(&caller),
            ChonkError::CallerAlreadyExists
        );
        self.authorized_callers.push(caller);
        Ok(())
    }

    pub fn remove_authorized_caller(&mut self, caller: &Pubkey) -> Result<()> {
        let pos = self
            .authorized_callers
            .iter()
            .position(|x| x == caller)
            .ok_or(ChonkError::CallerNotFound)?;

        // Stable removal (keeps relative order).
        self.authorized_callers.remove(pos);
        Ok(())
    }
}

pub fn add_authorized_caller(ctx: Context<AddAuthorizedCaller>, caller: Pubkey) -> Result<()> {
    let cfg: &mut Account<Config> = &mut ctx.accounts.config;
    require_keys_eq!(cfg.admin, ctx.accounts.admin.key(), ChonkError::Unauthorized);

    cfg.add_authorized_caller(caller)?;

    emit!(ConfigUpdated {
        field: ConfigField::AuthorizedCallers,
        admin: cfg.admin,
    });
    Ok(())
}

pub fn remove_authorized_caller(ctx: Context<RemoveAuthorizedCaller>, caller: Pubkey) -> Result<()> {
    let cfg: &mut Account<Config> = &mut ctx.accounts.config;
    require_keys_eq!(cfg.admin, ctx.accounts.admin.key(), ChonkError::Unauthorized);

    cfg.remove_authorized_caller(&caller)?;

    emit!(ConfigUpdated {
        field: ConfigField::AuthorizedCallers,
        admin: cfg.admin,
    });
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allowlist_add_and_remove() {
        let mut cfg = Config::default();
        let a = Pubkey::new_unique();
        let b = Pubkey::new_unique();

        cfg.add_authorized_caller(a).expect("add a");
        cfg.add_authorized_caller(b).expect("add b");
        assert!(cfg.is_authorized_caller(&a));
        assert!(cfg.add_authorized_caller(a).is_err());

        cfg.remove_authorized_caller(&a).expect("remove a");
        assert!(!cfg.is_authorized_caller(&a));
        assert_eq!(cfg.authorized_callers, vec![b]);
        assert!(cfg.remove_authorized_caller(&a).is_err());
    }

    #[test]
    fn only_listed_callers_pass_the_gate() {
        let mut cfg = Config::default();
        let listed = Pubkey::new_unique();
        cfg.add_authorized_caller(listed).expect("add");

        cfg.require_authorized_caller(&listed).expect("listed");
        assert_eq!(
            cfg.require_authorized_caller(&Pubkey::new_unique()).unwrap_err(),
            anchor_lang::error::Error::from(ChonkError::Unauthorized)
        );
        // the default key is never on the list
        assert!(cfg.require_authorized_caller(&Pubkey::default()).is_err());
    }

    #[test]
    fn allowlist_is_bounded() {
        let mut cfg = Config::default();
        for _ in 0..MAX_AUTHORIZED_CALLERS {
            cfg.add_authorized_caller(Pubkey::new_unique()).expect("add");
        }
        let res = cfg.add_authorized_caller(Pubkey::new_unique());
        assert_eq!(
            res.unwrap_err(),
            anchor_lang::error::Error::from(ChonkError::CallerListFull)
        );
        assert!(cfg.add_authorized_caller(Pubkey::default()).is_err());
    }
}
