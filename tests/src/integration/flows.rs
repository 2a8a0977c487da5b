//! # Integration Test Flows
//!
//! End-to-end wallet lifecycles across pw-02 (codec), pw-01 (store),
//! pw-03 (account) and pw-04 (factory).
//!
//! ## Flows Tested:
//!
//! 1. **Onboarding**: authData → factory → first signer → first operation
//! 2. **Initcode path**: pre-registered signer + CREATION signature at nonce 0
//! 3. **Signer rotation**: add a second passkey through the self-call path, remove the first
//! 4. **Deterministic addressing**: address known before deployment, stable after
//! 5. **Off-chain signatures**: ERC-1271 check against a registered passkey

#[cfg(test)]
mod tests {
    use crate::harness::{Passkey, Wallet, ENTRYPOINT, FACTORY};
    use pw_03_smart_account::prelude::*;
    use pw_03_smart_account::SignerAdded;
    use pw_04_account_factory::prelude::*;
    use shared_types::{keccak256, Address, Signer, U256};

    const RECIPIENT: Address = Address::new([0x77; 20]);

    // =============================================================================
    // ONBOARDING
    // =============================================================================

    #[test]
    fn test_onboarding_then_first_operation() -> anyhow::Result<()> {
        let mut wallet = Wallet::default();
        let passkey = Passkey::new(b"alice-laptop", 0x1111, 0x2222);
        let predicted = wallet.factory.compute_address(keccak256(b"alice"));

        let account = wallet.onboard("alice", &passkey)?;
        assert_eq!(account.address(), predicted);

        let signer = account.get_signer_by_credential_id(&wallet.host, b"alice-laptop")?;
        assert_eq!(signer, Signer::new(passkey.id_hash(), passkey.x, passkey.y));

        let op = wallet.signed_op(account.address(), b"transfer(1 ether)", &passkey);
        assert_eq!(wallet.submit(&account, &op, RECIPIENT)?, ValidationCode::Success);

        let call = &wallet.host.calls()[0];
        assert_eq!(call.from, account.address());
        assert_eq!(call.target, RECIPIENT);
        assert_eq!(call.data, b"transfer(1 ether)".to_vec());
        assert_eq!(wallet.host.nonce(account.address()), U256::one());
        Ok(())
    }

    #[test]
    fn test_onboarding_emits_signer_added() -> anyhow::Result<()> {
        let mut wallet = Wallet::default();
        let passkey = Passkey::new(b"alice-phone", 5, 6);
        let account = wallet.onboard("alice", &passkey)?;

        let events: Vec<_> = wallet.host.logs().iter().filter_map(SignerAdded::from_log).collect();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].signer.credential_id_hash, passkey.id_hash());
        assert_eq!(wallet.host.logs()[0].address, account.address());
        Ok(())
    }

    #[test]
    fn test_sequential_operations_advance_nonce() -> anyhow::Result<()> {
        let mut wallet = Wallet::default();
        let passkey = Passkey::new(b"bob", 9, 10);
        let account = wallet.onboard("bob", &passkey)?;

        for i in 0..3u8 {
            let op = wallet.signed_op(account.address(), &[i], &passkey);
            assert_eq!(wallet.submit(&account, &op, RECIPIENT)?, ValidationCode::Success);
        }
        assert_eq!(wallet.host.nonce(account.address()), U256::from(3));
        assert_eq!(wallet.host.calls().len(), 3);
        Ok(())
    }

    // =============================================================================
    // INITCODE PATH
    // =============================================================================

    #[test]
    fn test_qdqd_scenario() -> anyhow::Result<()> {
        let mut wallet = Wallet::default();
        let account = wallet.factory.create_account_with_signer(
            &mut wallet.host,
            keccak256(b"carol"),
            U256::from(123),
            U256::from(456),
            keccak256(b"qdqd"),
        )?;

        assert_eq!(
            account.get_signer(&wallet.host, keccak256(b"qdqd"))?,
            Signer::new(keccak256(b"qdqd"), U256::from(123), U256::from(456))
        );
        assert!(account.get_signer(&wallet.host, keccak256(b"unrelated"))?.is_zero());
        Ok(())
    }

    #[test]
    fn test_creation_signature_authorizes_first_operation() -> anyhow::Result<()> {
        let mut wallet = Wallet::default();
        let passkey = Passkey::new(b"qdqd", 123, 456);
        let account = wallet.factory.create_account_with_signer(
            &mut wallet.host,
            keccak256(b"carol"),
            passkey.x,
            passkey.y,
            passkey.id_hash(),
        )?;

        let sig = wallet.creation_signature(&wallet.authority, account.address(), "carol", &passkey);
        let op = UserOperation::new(account.address(), U256::zero(), Vec::new()).with_signature(sig);
        assert_eq!(wallet.submit(&account, &op, RECIPIENT)?, ValidationCode::Success);

        // Same CREATION signature after the first operation.
        let replay = UserOperation { nonce: U256::one(), ..op };
        assert_eq!(
            account.validate_signature(&wallet.host, ENTRYPOINT, &replay)?,
            ValidationCode::Failure
        );
        Ok(())
    }

    // =============================================================================
    // SIGNER ROTATION
    // =============================================================================

    #[test]
    fn test_rotate_passkeys_through_self_calls() -> anyhow::Result<()> {
        let mut wallet = Wallet::default();
        let old = Passkey::new(b"old-device", 1, 2);
        let new = Passkey::new(b"new-device", 3, 4);
        let account = wallet.onboard("dave", &old)?;
        let me = account.address();

        let add = SelfCall::AddWebAuthnSigner {
            x: new.x,
            y: new.y,
            credential_id_hash: new.id_hash(),
        }
        .encode();
        let op = wallet.signed_op(me, &add, &old);
        assert_eq!(wallet.submit(&account, &op, me)?, ValidationCode::Success);
        assert_eq!(account.get_signer(&wallet.host, new.id_hash())?.x, new.x);

        let remove = SelfCall::RemoveWebAuthnSigner {
            credential_id_hash: old.id_hash(),
        }
        .encode();
        let op = wallet.signed_op(me, &remove, &new);
        assert_eq!(wallet.submit(&account, &op, me)?, ValidationCode::Success);
        assert!(account.get_signer(&wallet.host, old.id_hash())?.is_zero());

        let stale = wallet.signed_op(me, b"anything", &old);
        assert_eq!(wallet.submit(&account, &stale, RECIPIENT)?, ValidationCode::Failure);
        let fresh = wallet.signed_op(me, b"anything", &new);
        assert_eq!(wallet.submit(&account, &fresh, RECIPIENT)?, ValidationCode::Success);
        Ok(())
    }

    #[test]
    fn test_batch_adds_signer_and_calls_out() -> anyhow::Result<()> {
        let mut wallet = Wallet::default();
        let passkey = Passkey::new(b"erin", 1, 1);
        let backup = Passkey::new(b"erin-backup", 2, 2);
        let account = wallet.onboard("erin", &passkey)?;
        let add = SelfCall::AddWebAuthnSigner {
            x: backup.x,
            y: backup.y,
            credential_id_hash: backup.id_hash(),
        }
        .encode();

        let results = account.execute_batch(
            &mut wallet.host,
            ENTRYPOINT,
            &[account.address(), RECIPIENT],
            &[U256::zero(), U256::from(1000)],
            &[add, b"pay".to_vec()],
        )?;

        assert_eq!(results.len(), 2);
        assert_eq!(account.get_signer(&wallet.host, backup.id_hash())?.y, backup.y);
        assert_eq!(wallet.host.calls()[0].value, U256::from(1000));
        Ok(())
    }

    // =============================================================================
    // DETERMINISTIC ADDRESSING
    // =============================================================================

    #[test]
    fn test_address_invariant_and_single_use() -> anyhow::Result<()> {
        let mut wallet = Wallet::default();
        let seed = keccak256(b"frank");
        let before = wallet.factory.compute_address(seed);

        let account = wallet.factory.create_account(&mut wallet.host, seed)?;
        assert_eq!(account.address(), before);
        assert_eq!(wallet.factory.compute_address(seed), before);

        assert_eq!(
            wallet.factory.create_account(&mut wallet.host, seed).unwrap_err(),
            FactoryError::AccountAlreadyExists { address: before }
        );

        let attached = wallet.factory.attach(&wallet.host, before)?;
        assert_eq!(attached.immutables().factory, FACTORY);
        assert_eq!(attached.immutables().entrypoint, ENTRYPOINT);
        Ok(())
    }

    #[test]
    fn test_factories_with_different_entrypoints_diverge() {
        let wallet = Wallet::default();
        let mut config = *wallet.factory.config();
        config.entrypoint = Address::new([0xE1; 20]);
        let other = AccountFactory::new(config, wallet.verifier).expect("valid config");

        let seed = keccak256(b"grace");
        assert_ne!(wallet.factory.compute_address(seed), other.compute_address(seed));
    }

    // =============================================================================
    // OFF-CHAIN SIGNATURES
    // =============================================================================

    #[test]
    fn test_erc1271_with_registered_passkey() -> anyhow::Result<()> {
        let mut wallet = Wallet::default();
        let passkey = Passkey::new(b"heidi", 8, 9);
        let account = wallet.onboard("heidi", &passkey)?;

        let hash = keccak256(b"Sign in to example.com");
        let (r, s) = wallet
            .verifier
            .sign(b"auth", b"client", &hash, passkey.x, passkey.y);
        let sig = WebAuthnSignature {
            kind: 1,
            authenticator_data: b"auth".to_vec(),
            client_data: b"client".to_vec(),
            r,
            s,
            credential_id_hash: passkey.id_hash(),
        }
        .to_signature();

        assert_eq!(account.is_valid_signature(&wallet.host, hash, &sig)?, ERC1271_MAGIC_VALUE);
        assert_eq!(
            account.is_valid_signature(&wallet.host, keccak256(b"other"), &sig)?,
            ERC1271_INVALID
        );
        Ok(())
    }
}
