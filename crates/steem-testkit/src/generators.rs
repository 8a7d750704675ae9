//! Proptest generators for property-based testing.

use proptest::prelude::*;

use steem_core::operation::{
    AccountWitnessVoteOperation, CommentOperation, CustomJsonOperation,
    DelegateVestingSharesOperation, TransferOperation, VoteOperation,
};
use steem_core::{
    Asset, BlockId, Operation, PrivateKey, Sha256Hash, Symbol, TimePointSec, Transaction,
};

/// Generate a valid private key.
pub fn private_key() -> impl Strategy<Value = PrivateKey> {
    any::<[u8; 32]>().prop_filter_map("invalid scalar", |seed| {
        PrivateKey::from_slice(&seed).ok()
    })
}

/// Generate a random digest.
pub fn digest() -> impl Strategy<Value = Sha256Hash> {
    any::<[u8; 32]>().prop_map(Sha256Hash)
}

/// Generate a random BlockId.
pub fn block_id() -> impl Strategy<Value = BlockId> {
    any::<[u8; 20]>().prop_map(BlockId::from_bytes)
}

/// Generate an account name.
pub fn account_name() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9-]{2,15}".prop_map(String::from)
}

/// Generate a permlink.
pub fn permlink() -> impl Strategy<Value = String> {
    "[a-z0-9-]{1,64}".prop_map(String::from)
}

/// Generate free text, including non-ASCII.
pub fn text(max_len: usize) -> impl Strategy<Value = String> {
    prop::collection::vec(any::<char>(), 0..=max_len).prop_map(|c| c.into_iter().collect())
}

pub fn symbol() -> impl Strategy<Value = Symbol> {
    prop_oneof![Just(Symbol::Steem), Just(Symbol::Sbd), Just(Symbol::Vests)]
}

/// Generate an asset whose amount survives a decimal string round trip.
pub fn asset() -> impl Strategy<Value = Asset> {
    (-1_000_000_000_000_000i64..=1_000_000_000_000_000i64, symbol())
        .prop_map(|(amount, symbol)| Asset::new(amount, symbol))
}

/// Generate a timestamp between 1970 and 2100.
pub fn time_point() -> impl Strategy<Value = TimePointSec> {
    (0u32..=4_102_444_800u32).prop_map(TimePointSec)
}

/// Generate one encodable user operation.
pub fn operation() -> impl Strategy<Value = Operation> {
    prop_oneof![
        (account_name(), account_name(), permlink(), any::<i16>()).prop_map(
            |(voter, author, permlink, weight)| VoteOperation {
                voter,
                author,
                permlink,
                weight,
            }
            .into()
        ),
        (account_name(), account_name(), asset(), text(64)).prop_map(
            |(from, to, amount, memo)| TransferOperation {
                from,
                to,
                amount,
                memo,
            }
            .into()
        ),
        (account_name(), permlink(), text(32), text(256)).prop_map(
            |(author, permlink, title, body)| CommentOperation {
                parent_author: String::new(),
                parent_permlink: "steem".into(),
                author,
                permlink,
                title,
                body,
                json_metadata: "{}".into(),
            }
            .into()
        ),
        (prop::collection::vec(account_name(), 0..3), account_name(), text(64)).prop_map(
            |(posting, id, json)| CustomJsonOperation {
                required_auths: vec![],
                required_posting_auths: posting,
                id,
                json,
            }
            .into()
        ),
        (account_name(), account_name(), any::<bool>()).prop_map(
            |(account, witness, approve)| AccountWitnessVoteOperation {
                account,
                witness,
                approve,
            }
            .into()
        ),
        (account_name(), account_name(), 0i64..=i64::MAX / 2).prop_map(
            |(delegator, delegatee, amount)| DelegateVestingSharesOperation {
                delegator,
                delegatee,
                vesting_shares: Asset::vests(amount),
            }
            .into()
        ),
    ]
}

/// Parameters for generating a transaction.
#[derive(Debug, Clone)]
pub struct TransactionParams {
    pub ref_block_num: u16,
    pub ref_block_prefix: u32,
    pub expiration: TimePointSec,
    pub operations: Vec<Operation>,
}

impl Arbitrary for TransactionParams {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        (
            any::<u16>(),
            any::<u32>(),
            time_point(),
            prop::collection::vec(operation(), 0..5),
        )
            .prop_map(
                |(ref_block_num, ref_block_prefix, expiration, operations)| TransactionParams {
                    ref_block_num,
                    ref_block_prefix,
                    expiration,
                    operations,
                },
            )
            .boxed()
    }
}

/// Build a transaction from parameters.
pub fn transaction_from_params(params: &TransactionParams) -> Transaction {
    Transaction::builder()
        .ref_block_num(params.ref_block_num)
        .ref_block_prefix(params.ref_block_prefix)
        .expiration(params.expiration)
        .operations(params.operations.iter().cloned())
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use steem_core::{
        from_bytes, sign_digest, AddressPrefix, ChainId, CounterNonce, RandomNonce,
        Secp256k1Context,
    };

    proptest! {
        #[test]
        fn test_transaction_binary_roundtrip(params: TransactionParams) {
            let tx = transaction_from_params(&params);
            let bytes = tx.to_bytes().unwrap();
            prop_assert_eq!(from_bytes::<Transaction>(&bytes).unwrap(), tx);
        }

        #[test]
        fn test_transaction_json_roundtrip(params: TransactionParams) {
            let tx = transaction_from_params(&params);
            let json = serde_json::to_string(&tx).unwrap();
            prop_assert_eq!(serde_json::from_str::<Transaction>(&json).unwrap(), tx);
        }

        #[test]
        fn test_digest_deterministic(params: TransactionParams) {
            let t1 = transaction_from_params(&params);
            let t2 = transaction_from_params(&params);
            prop_assert_eq!(
                t1.digest(&ChainId::MainNet).unwrap(),
                t2.digest(&ChainId::MainNet).unwrap()
            );
            prop_assert_ne!(
                t1.digest(&ChainId::MainNet).unwrap(),
                t1.digest(&ChainId::TestNet).unwrap()
            );
        }

        #[test]
        fn test_asset_string_roundtrip(asset in asset()) {
            let parsed = Asset::parse(&asset.to_string()).unwrap();
            prop_assert_eq!(parsed, asset);
        }

        #[test]
        fn test_signature_canonical_and_recoverable(key in private_key(), digest in digest()) {
            let ctx = Secp256k1Context::new();
            let sig = sign_digest(&ctx, &digest, &key, &mut RandomNonce).unwrap();
            prop_assert!(sig.is_canonical());

            let expected = key.public_key(&ctx, AddressPrefix::MainNet);
            prop_assert_eq!(sig.recover(&ctx, &digest, AddressPrefix::MainNet).unwrap(), expected.clone());
            prop_assert!(sig.verify(&ctx, &digest, &expected));
        }

        #[test]
        fn test_counter_nonce_reproducible(key in private_key(), digest in digest()) {
            let ctx = Secp256k1Context::new();
            let s1 = sign_digest(&ctx, &digest, &key, &mut CounterNonce::new()).unwrap();
            let s2 = sign_digest(&ctx, &digest, &key, &mut CounterNonce::new()).unwrap();
            prop_assert_eq!(s1, s2);
        }

        #[test]
        fn test_reference_block_fields(id in block_id()) {
            let tx = Transaction::builder().reference_block(&id).build();
            prop_assert_eq!(tx.ref_block_num as u32, id.num() & 0xffff);
            prop_assert_eq!(tx.ref_block_prefix, id.prefix());
        }
    }
}
