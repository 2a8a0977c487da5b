//! # Passkey Wallet Benchmarks
//!
//! | Subsystem | Operation | Target |
//! |-----------|-----------|--------|
//! | pw-01 Credential Store | signer lookup | < 10μs |
//! | pw-02 Authenticator Codec | decode, 64-byte credential id | < 5μs |
//! | pw-03 Smart Account | WebAuthn validation | < 50μs |
//! | pw-03 Smart Account | CREATION validation (ECDSA recovery) | < 1ms |
//! | pw-04 Account Factory | create_and_init_account | < 1ms |

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use pw_01_credential_store::{CredentialStore, InMemoryState};
use pw_02_authenticator_codec::{decode, encode};
use pw_03_smart_account::domain::ecdsa::test_helpers::{address_of, generate_keypair, sign};
use pw_03_smart_account::prelude::*;
use pw_04_account_factory::prelude::*;
use rand::Rng;
use shared_types::{keccak256, Address, Hash, Signer, SignerKind, U256};
use std::time::Duration;

const ENTRYPOINT: Address = Address::new([0xE0; 20]);

fn factory(authority: Address) -> AccountFactory<DigestVerifier> {
    let config = FactoryConfig {
        factory_address: Address::new([0xFA; 20]),
        authority,
        entrypoint: ENTRYPOINT,
        verifier: Address::new([0x5E; 20]),
    };
    AccountFactory::new(config, DigestVerifier::new(keccak256(b"bench"))).expect("valid config")
}

// ============================================================================
// PW-01: Credential Store
// ============================================================================

fn bench_credential_store(c: &mut Criterion) {
    let mut group = c.benchmark_group("pw-01-credential-store");
    let account = Address::new([1; 20]);
    let store = CredentialStore::<Signer>::for_signers(account, SignerKind::WebAuthnP256);

    for size in [10usize, 100, 1000] {
        let mut state = InMemoryState::new();
        let keys: Vec<Hash> = (0..size).map(|i| keccak256(&i.to_be_bytes())).collect();
        for key in &keys {
            store
                .set(&mut state, &Signer::new(*key, U256::one(), U256::one()))
                .expect("fresh key");
        }

        group.throughput(Throughput::Elements(1));
        group.bench_with_input(BenchmarkId::new("get", size), &keys, |b, keys| {
            let mut i = 0usize;
            b.iter(|| {
                i = (i + 1) % keys.len();
                black_box(store.get(&state, keys[i]).expect("readable"))
            })
        });
    }
    group.finish();
}

// ============================================================================
// PW-02: Authenticator Codec
// ============================================================================

fn bench_codec(c: &mut Criterion) {
    let mut group = c.benchmark_group("pw-02-authenticator-codec");
    let mut rng = rand::thread_rng();

    for id_len in [16usize, 64, 1024] {
        let id: Vec<u8> = (0..id_len).map(|_| rng.gen()).collect();
        let blob = encode(&id, U256::from(rng.gen::<u64>()), U256::from(rng.gen::<u64>())).expect("fits");
        group.throughput(Throughput::Bytes(blob.len() as u64));
        group.bench_with_input(BenchmarkId::new("decode", id_len), &blob, |b, blob| {
            b.iter(|| black_box(decode(blob).expect("valid blob")))
        });
    }
    group.finish();
}

// ============================================================================
// PW-03: Smart Account
// ============================================================================

fn bench_validation(c: &mut Criterion) {
    let mut group = c.benchmark_group("pw-03-smart-account");
    group.measurement_time(Duration::from_secs(5));

    let (authority_key, _) = generate_keypair();
    let factory = factory(address_of(&authority_key));
    let verifier = DigestVerifier::new(keccak256(b"bench"));
    let mut host = SimulatedHost::new(HostConfig { chain_id: 1 });
    let (x, y, cred) = (U256::from(123), U256::from(456), keccak256(b"qdqd"));
    let account = factory
        .create_account_with_signer(&mut host, keccak256(b"bench"), x, y, cred)
        .expect("deployable");

    // WebAuthn path
    let op = UserOperation::new(account.address(), U256::zero(), vec![0xAB; 256]);
    let op_hash = replay_guard::operation_hash(op.sender, op.nonce, &op.call_data, &op.sponsor_payload);
    let challenge = replay_guard::webauthn_challenge(op_hash, ENTRYPOINT, 1);
    let (r, s) = verifier.sign(b"auth", b"client", &challenge, x, y);
    let webauthn_op = op.clone().with_signature(
        WebAuthnSignature {
            kind: 1,
            authenticator_data: b"auth".to_vec(),
            client_data: b"client".to_vec(),
            r,
            s,
            credential_id_hash: cred,
        }
        .to_signature(),
    );
    group.bench_function("validate_webauthn", |b| {
        b.iter(|| black_box(account.validate_signature(&host, ENTRYPOINT, &webauthn_op).expect("valid")))
    });

    // CREATION path
    let username_hash = keccak256(b"bench");
    let message = replay_guard::creation_message(username_hash, x, y, cred, account.address(), 1);
    let creation_op = op.with_signature(
        CreationPayload {
            factory: factory.config().factory_address,
            selector: [0; 4],
            x,
            y,
            username_hash,
            credential_id_hash: cred,
            authority_signature: Some(sign(&replay_guard::message_hash(&message), &authority_key)),
        }
        .to_signature(),
    );
    group.bench_function("validate_creation", |b| {
        b.iter(|| black_box(account.validate_signature(&host, ENTRYPOINT, &creation_op).expect("valid")))
    });

    group.finish();
}

// ============================================================================
// PW-04: Account Factory
// ============================================================================

fn bench_deployment(c: &mut Criterion) {
    let mut group = c.benchmark_group("pw-04-account-factory");
    let (authority_key, _) = generate_keypair();
    let factory = factory(address_of(&authority_key));
    let auth_data = encode(b"credential", U256::from(1), U256::from(2)).expect("fits");
    let cred = keccak256(b"credential");

    group.bench_function("compute_address", |b| {
        b.iter(|| black_box(factory.compute_address(black_box(keccak256(b"seed")))))
    });

    group.bench_function("create_and_init_account", |b| {
        let mut host = SimulatedHost::new(HostConfig { chain_id: 1 });
        let mut n = 0u64;
        b.iter(|| {
            n += 1;
            let seed = keccak256(&n.to_be_bytes());
            let message = replay_guard::deployment_message(
                seed,
                U256::from(1),
                U256::from(2),
                cred,
                Hash::ZERO,
                1,
                factory.compute_address(seed),
            );
            let sig = sign(&replay_guard::message_hash(&message), &authority_key);
            black_box(
                factory
                    .create_and_init_account(&mut host, seed, &auth_data, &sig.bytes, Hash::ZERO)
                    .expect("authorized"),
            )
        })
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_credential_store,
    bench_codec,
    bench_validation,
    bench_deployment
);
criterion_main!(benches);
