//! # Forgery and Privilege Escalation
//!
//! The attacker holds no authority key and no registered passkey, and tries
//! to deploy, take over or mutate accounts anyway.

#[cfg(test)]
mod tests {
    use crate::harness::{Passkey, Wallet, ENTRYPOINT, FACTORY};
    use pw_01_credential_store::{StateAccess, StoreError};
    use pw_03_smart_account::domain::ecdsa::{self, test_helpers::generate_keypair};
    use pw_03_smart_account::domain::CREATION_PAYLOAD_MIN_LEN;
    use pw_03_smart_account::prelude::*;
    use pw_03_smart_account::FIRST_SIGNER_FUSE_SLOT;
    use pw_04_account_factory::prelude::*;
    use shared_types::{keccak256, Address, Hash, U256};

    const ATTACKER: Address = Address::new([0xBA; 20]);

    // =============================================================================
    // DEPLOYMENT FORGERY
    // =============================================================================

    #[test]
    fn test_forged_create_and_init_leaves_no_instance() {
        let mut wallet = Wallet::default();
        let (forger, _) = generate_keypair();
        let passkey = Passkey::new(b"attacker-key", 6, 6);
        let seed = keccak256(b"victim");
        let sig = wallet.authorize_deployment(&forger, seed, &passkey, Hash::ZERO);

        let result = wallet.factory.create_and_init_account(
            &mut wallet.host,
            seed,
            &passkey.authenticator_data(),
            &sig,
            Hash::ZERO,
        );

        assert_eq!(result.unwrap_err(), FactoryError::InvalidAuthoritySignature);
        assert_eq!(wallet.host.instance_at(wallet.factory.compute_address(seed)), None);
        assert!(wallet.host.logs().is_empty());
    }

    #[test]
    fn test_swapped_passkey_invalidates_authorization() {
        let mut wallet = Wallet::default();
        let victim = Passkey::new(b"victim-key", 1, 2);
        let attacker = Passkey::new(b"attacker-key", 1, 2);
        let seed = keccak256(b"victim");
        let sig = wallet.authorize_deployment(&wallet.authority, seed, &victim, Hash::ZERO);

        let result = wallet.factory.create_and_init_account(
            &mut wallet.host,
            seed,
            &attacker.authenticator_data(),
            &sig,
            Hash::ZERO,
        );

        assert_eq!(result.unwrap_err(), FactoryError::InvalidAuthoritySignature);
        assert_eq!(wallet.host.instance_at(wallet.factory.compute_address(seed)), None);
    }

    #[test]
    fn test_malleated_authority_signature_rejected() -> anyhow::Result<()> {
        let mut wallet = Wallet::default();
        let passkey = Passkey::new(b"qdqd", 123, 456);
        let account = wallet.factory.create_account_with_signer(
            &mut wallet.host,
            keccak256(b"carol"),
            passkey.x,
            passkey.y,
            passkey.id_hash(),
        )?;

        let mut sig = wallet.creation_signature(&wallet.authority, account.address(), "carol", &passkey);
        // tag(1) + payload(152), then r(32) ‖ s(32) ‖ v(1)
        let s_at = 1 + CREATION_PAYLOAD_MIN_LEN + 32;
        let mut s = [0u8; 32];
        s.copy_from_slice(&sig[s_at..s_at + 32]);
        sig[s_at..s_at + 32].copy_from_slice(&ecdsa::invert_s(&s));
        sig[s_at + 32] = if sig[s_at + 32] == 27 { 28 } else { 27 };

        let op = UserOperation::new(account.address(), U256::zero(), Vec::new()).with_signature(sig);
        assert_eq!(
            account.validate_signature(&wallet.host, ENTRYPOINT, &op)?,
            ValidationCode::Failure
        );
        Ok(())
    }

    #[test]
    fn test_creation_payload_from_foreign_factory() -> anyhow::Result<()> {
        let mut wallet = Wallet::default();
        let passkey = Passkey::new(b"qdqd", 123, 456);
        let account = wallet.factory.create_account_with_signer(
            &mut wallet.host,
            keccak256(b"carol"),
            passkey.x,
            passkey.y,
            passkey.id_hash(),
        )?;

        let mut sig = wallet.creation_signature(&wallet.authority, account.address(), "carol", &passkey);
        sig[1..21].copy_from_slice(ATTACKER.as_bytes());
        let op = UserOperation::new(account.address(), U256::zero(), Vec::new()).with_signature(sig);

        assert_eq!(
            account.validate_signature(&wallet.host, ENTRYPOINT, &op)?,
            ValidationCode::Failure
        );
        Ok(())
    }

    // =============================================================================
    // ACCOUNT TAKEOVER
    // =============================================================================

    #[test]
    fn test_unregistered_passkey_cannot_sign() -> anyhow::Result<()> {
        let mut wallet = Wallet::default();
        let owner = Passkey::new(b"owner", 1, 2);
        let account = wallet.onboard("owner", &owner)?;

        let intruder = Passkey::new(b"intruder", 3, 4);
        let op = wallet.signed_op(account.address(), b"drain", &intruder);
        assert_eq!(
            account.validate_signature(&wallet.host, ENTRYPOINT, &op)?,
            ValidationCode::Failure
        );
        Ok(())
    }

    #[test]
    fn test_claiming_owner_credential_with_wrong_key() -> anyhow::Result<()> {
        let mut wallet = Wallet::default();
        let owner = Passkey::new(b"owner", 1, 2);
        let account = wallet.onboard("owner", &owner)?;

        // Same credential id, attacker's own public key.
        let impostor = Passkey::new(b"owner", 9, 9);
        let op = wallet.signed_op(account.address(), b"drain", &impostor);
        assert_eq!(
            account.validate_signature(&wallet.host, ENTRYPOINT, &op)?,
            ValidationCode::Failure
        );
        Ok(())
    }

    #[test]
    fn test_external_signer_injection_rejected() -> anyhow::Result<()> {
        let mut wallet = Wallet::default();
        let account = wallet.onboard("owner", &Passkey::new(b"owner", 1, 2))?;
        let evil = keccak256(b"evil");

        assert_eq!(
            account
                .add_webauthn_signer(&mut wallet.host, ATTACKER, U256::one(), U256::one(), evil)
                .unwrap_err(),
            AccountError::NotSelf { caller: ATTACKER }
        );
        assert_eq!(
            account
                .add_webauthn_signer(&mut wallet.host, ENTRYPOINT, U256::one(), U256::one(), evil)
                .unwrap_err(),
            AccountError::NotSelf { caller: ENTRYPOINT }
        );
        assert_eq!(
            account.remove_webauthn_signer(&mut wallet.host, ATTACKER, evil).unwrap_err(),
            AccountError::NotSelf { caller: ATTACKER }
        );
        assert!(account.get_signer(&wallet.host, evil)?.is_zero());
        Ok(())
    }

    #[test]
    fn test_reentrant_execute_from_call_target() -> anyhow::Result<()> {
        let mut wallet = Wallet::default();
        let account = wallet.onboard("owner", &Passkey::new(b"owner", 1, 2))?;
        let add = SelfCall::AddWebAuthnSigner {
            x: U256::one(),
            y: U256::one(),
            credential_id_hash: keccak256(b"evil"),
        }
        .encode();

        // A called contract re-entering with itself as caller.
        let err = account
            .execute(&mut wallet.host, ATTACKER, account.address(), U256::zero(), &add)
            .unwrap_err();
        assert_eq!(err, AccountError::NotEntryPoint { caller: ATTACKER });
        assert!(account.get_signer(&wallet.host, keccak256(b"evil"))?.is_zero());
        Ok(())
    }

    #[test]
    fn test_first_signer_cannot_be_reset() -> anyhow::Result<()> {
        let mut wallet = Wallet::default();
        let owner = Passkey::new(b"owner", 1, 2);
        let account = wallet.onboard("owner", &owner)?;

        assert_eq!(
            account
                .add_first_signer(&mut wallet.host, FACTORY, U256::one(), U256::one(), keccak256(b"evil"))
                .unwrap_err(),
            AccountError::FirstSignerAlreadySet
        );
        assert_eq!(
            account
                .add_first_signer(&mut wallet.host, ATTACKER, U256::one(), U256::one(), keccak256(b"evil"))
                .unwrap_err(),
            AccountError::NotFactory { caller: ATTACKER }
        );
        assert!(!wallet.host.load(account.address(), &FIRST_SIGNER_FUSE_SLOT)?.is_zero());
        Ok(())
    }

    #[test]
    fn test_overwrite_existing_passkey_rejected() -> anyhow::Result<()> {
        let mut wallet = Wallet::default();
        let owner = Passkey::new(b"owner", 1, 2);
        let account = wallet.onboard("owner", &owner)?;
        let overwrite = SelfCall::AddWebAuthnSigner {
            x: U256::from(9),
            y: U256::from(9),
            credential_id_hash: owner.id_hash(),
        }
        .encode();

        let op = wallet.signed_op(account.address(), &overwrite, &owner);
        assert_eq!(
            account.validate_signature(&wallet.host, ENTRYPOINT, &op)?,
            ValidationCode::Success
        );
        let err = account
            .execute(&mut wallet.host, ENTRYPOINT, account.address(), U256::zero(), &overwrite)
            .unwrap_err();

        assert_eq!(
            err,
            AccountError::Store(StoreError::OverrideNotAllowed { key: owner.id_hash() })
        );
        assert_eq!(account.get_signer(&wallet.host, owner.id_hash())?.x, owner.x);
        Ok(())
    }

    #[test]
    fn test_validation_only_for_entrypoint() -> anyhow::Result<()> {
        let mut wallet = Wallet::default();
        let owner = Passkey::new(b"owner", 1, 2);
        let account = wallet.onboard("owner", &owner)?;
        let op = wallet.signed_op(account.address(), b"x", &owner);

        assert_eq!(
            account.validate_signature(&wallet.host, ATTACKER, &op).unwrap_err(),
            AccountError::NotEntryPoint { caller: ATTACKER }
        );
        Ok(())
    }
}
