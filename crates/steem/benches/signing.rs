use criterion::{black_box, criterion_group, criterion_main, Criterion};

use steem::core::operation::{TransferOperation, VoteOperation};
use steem::core::{from_bytes, Asset, ChainId, PrivateKey, TimePointSec, Transaction};
use steem::{NonceMode, Signer, SteemConfig};

fn sample_transaction() -> Transaction {
    Transaction::builder()
        .ref_block_num(33918)
        .ref_block_prefix(2_329_120_500)
        .expiration(TimePointSec(1_464_911_934))
        .operation(VoteOperation {
            voter: "foo".into(),
            author: "bar".into(),
            permlink: "baz".into(),
            weight: 10_000,
        })
        .operation(TransferOperation {
            from: "foo".into(),
            to: "bar".into(),
            amount: Asset::steem(10_000),
            memo: "baz".into(),
        })
        .build()
}

fn bench_codec(c: &mut Criterion) {
    let tx = sample_transaction();
    let bytes = tx.to_bytes().unwrap();
    let json = serde_json::to_string(&tx).unwrap();

    c.bench_function("transaction_to_bytes", |b| {
        b.iter(|| black_box(&tx).to_bytes().unwrap())
    });
    c.bench_function("transaction_from_bytes", |b| {
        b.iter(|| from_bytes::<Transaction>(black_box(&bytes)).unwrap())
    });
    c.bench_function("transaction_from_json", |b| {
        b.iter(|| serde_json::from_str::<Transaction>(black_box(&json)).unwrap())
    });
    c.bench_function("transaction_digest", |b| {
        b.iter(|| black_box(&tx).digest(&ChainId::MainNet).unwrap())
    });
}

fn bench_signing(c: &mut Criterion) {
    let key = PrivateKey::from_seed("bench").unwrap();
    let random = Signer::new(SteemConfig::mainnet());
    let deterministic =
        Signer::new(SteemConfig::mainnet().with_nonce_mode(NonceMode::Deterministic));
    let signed = random
        .sign_transaction(sample_transaction(), &[key.clone()])
        .unwrap();

    c.bench_function("sign_random_nonce", |b| {
        b.iter(|| {
            random
                .sign_transaction(sample_transaction(), std::slice::from_ref(&key))
                .unwrap()
        })
    });
    c.bench_function("sign_counter_nonce", |b| {
        b.iter(|| {
            deterministic
                .sign_transaction(sample_transaction(), std::slice::from_ref(&key))
                .unwrap()
        })
    });
    c.bench_function("recover_signer", |b| {
        b.iter(|| random.signing_keys(black_box(&signed)).unwrap())
    });
}

criterion_group!(benches, bench_codec, bench_signing);
criterion_main!(benches);
