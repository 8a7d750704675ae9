//! The operation tagged union.
//!
//! Every protocol action is one variant of [`Operation`]. A single table maps
//! each variant to its binary id, its JSON name and whether it is virtual;
//! both codecs dispatch through that table.
//!
//! Binary form: varint id followed by the fields in declaration order.
//! JSON form: `[name, {fields}]`.
//!
//! Ids the table does not know decode to [`Operation::Unknown`] instead of
//! failing, so blocks from newer protocol versions can still be read. Unknown
//! and virtual operations cannot be binary encoded.

use std::fmt;

use bytes::Bytes;
use serde::de::{self, IgnoredAny, SeqAccess, Visitor};
use serde::ser::{Error as _, SerializeTuple};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use tracing::trace;

use crate::error::{CoreError, Result};
use crate::serializer::{BinaryDecode, BinaryEncode, BinaryReader, BinaryWriter};

/// Declare a struct whose binary field order is its declaration order.
macro_rules! wire_struct {
    (
        $(#[$meta:meta])*
        $name:ident {
            $( $(#[$fmeta:meta])* $field:ident : $ty:ty ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
        pub struct $name {
            $( $(#[$fmeta])* pub $field: $ty, )*
        }

        crate::binary_fields!($name { $($field),* });
    };
}

mod user;
mod virtual_ops;

pub use user::*;
pub use virtual_ops::*;

/// An operation the codec has no layout for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnknownOperation {
    /// Read from binary: the id and every byte after it.
    Binary { id: u64, data: Bytes },
    /// Read from JSON: the name and raw payload.
    Json {
        name: String,
        value: serde_json::Value,
    },
}

impl fmt::Display for UnknownOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnknownOperation::Binary { id, .. } => write!(f, "unknown operation id {}", id),
            UnknownOperation::Json { name, .. } => write!(f, "unknown operation {:?}", name),
        }
    }
}

macro_rules! operation_table {
    ( $( $id:literal $name:literal $variant:ident($ty:ident) $virt:literal; )* ) => {
        /// Discriminant of a known operation.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum OperationKind {
            $( $variant, )*
        }

        impl OperationKind {
            /// Every known kind, in id order.
            pub const ALL: &'static [OperationKind] = &[ $( OperationKind::$variant, )* ];

            /// Binary discriminant.
            pub const fn id(self) -> u64 {
                match self {
                    $( OperationKind::$variant => $id, )*
                }
            }

            /// JSON discriminant.
            pub const fn name(self) -> &'static str {
                match self {
                    $( OperationKind::$variant => $name, )*
                }
            }

            /// Ledger-generated operations never appear in signed transactions.
            pub const fn is_virtual(self) -> bool {
                match self {
                    $( OperationKind::$variant => $virt, )*
                }
            }

            pub fn from_id(id: u64) -> Option<Self> {
                match id {
                    $( $id => Some(OperationKind::$variant), )*
                    _ => None,
                }
            }

            pub fn from_name(name: &str) -> Option<Self> {
                match name {
                    $( $name => Some(OperationKind::$variant), )*
                    _ => None,
                }
            }
        }

        /// A protocol operation.
        #[derive(Debug, Clone, PartialEq, Eq)]
        pub enum Operation {
            $( $variant($ty), )*
            Unknown(UnknownOperation),
        }

        impl Operation {
            /// The table entry, or `None` for unknown operations.
            pub fn kind(&self) -> Option<OperationKind> {
                match self {
                    $( Operation::$variant(_) => Some(OperationKind::$variant), )*
                    Operation::Unknown(_) => None,
                }
            }

            fn encode_payload(&self, w: &mut BinaryWriter) -> Result<()> {
                match self {
                    $( Operation::$variant(op) => op.binary_encode(w), )*
                    Operation::Unknown(op) => Err(CoreError::NotEncodable(op.to_string())),
                }
            }

            fn decode_payload(kind: OperationKind, r: &mut BinaryReader<'_>) -> Result<Self> {
                match kind {
                    $( OperationKind::$variant => Ok(Operation::$variant($ty::binary_decode(r)?)), )*
                }
            }

            fn serialize_payload<T: SerializeTuple>(
                &self,
                tuple: &mut T,
            ) -> std::result::Result<(), T::Error> {
                match self {
                    $( Operation::$variant(op) => tuple.serialize_element(op), )*
                    Operation::Unknown(op) => Err(T::Error::custom(CoreError::NotEncodable(op.to_string()))),
                }
            }

            fn next_payload<'de, A: SeqAccess<'de>>(
                kind: OperationKind,
                seq: &mut A,
            ) -> std::result::Result<Option<Self>, A::Error> {
                match kind {
                    $( OperationKind::$variant => Ok(seq.next_element::<$ty>()?.map(Operation::$variant)), )*
                }
            }
        }

        $(
            impl From<$ty> for Operation {
                fn from(op: $ty) -> Self {
                    Operation::$variant(op)
                }
            }
        )*
    };
}

operation_table! {
    0 "vote" Vote(VoteOperation) false;
    1 "comment" Comment(CommentOperation) false;
    2 "transfer" Transfer(TransferOperation) false;
    3 "transfer_to_vesting" TransferToVesting(TransferToVestingOperation) false;
    4 "withdraw_vesting" WithdrawVesting(WithdrawVestingOperation) false;
    5 "limit_order_create" LimitOrderCreate(LimitOrderCreateOperation) false;
    6 "limit_order_cancel" LimitOrderCancel(LimitOrderCancelOperation) false;
    7 "feed_publish" FeedPublish(FeedPublishOperation) false;
    8 "convert" Convert(ConvertOperation) false;
    9 "account_create" AccountCreate(AccountCreateOperation) false;
    10 "account_update" AccountUpdate(AccountUpdateOperation) false;
    11 "witness_update" WitnessUpdate(WitnessUpdateOperation) false;
    12 "account_witness_vote" AccountWitnessVote(AccountWitnessVoteOperation) false;
    13 "account_witness_proxy" AccountWitnessProxy(AccountWitnessProxyOperation) false;
    15 "custom" Custom(CustomOperation) false;
    17 "delete_comment" DeleteComment(DeleteCommentOperation) false;
    18 "custom_json" CustomJson(CustomJsonOperation) false;
    19 "comment_options" CommentOptions(CommentOptionsOperation) false;
    20 "set_withdraw_vesting_route" SetWithdrawVestingRoute(SetWithdrawVestingRouteOperation) false;
    21 "limit_order_create2" LimitOrderCreate2(LimitOrderCreate2Operation) false;
    22 "claim_account" ClaimAccount(ClaimAccountOperation) false;
    23 "create_claimed_account" CreateClaimedAccount(CreateClaimedAccountOperation) false;
    24 "request_account_recovery" RequestAccountRecovery(RequestAccountRecoveryOperation) false;
    25 "recover_account" RecoverAccount(RecoverAccountOperation) false;
    26 "change_recovery_account" ChangeRecoveryAccount(ChangeRecoveryAccountOperation) false;
    27 "escrow_transfer" EscrowTransfer(EscrowTransferOperation) false;
    28 "escrow_dispute" EscrowDispute(EscrowDisputeOperation) false;
    29 "escrow_release" EscrowRelease(EscrowReleaseOperation) false;
    31 "escrow_approve" EscrowApprove(EscrowApproveOperation) false;
    32 "transfer_to_savings" TransferToSavings(TransferToSavingsOperation) false;
    33 "transfer_from_savings" TransferFromSavings(TransferFromSavingsOperation) false;
    34 "cancel_transfer_from_savings" CancelTransferFromSavings(CancelTransferFromSavingsOperation) false;
    35 "custom_binary" CustomBinary(CustomBinaryOperation) false;
    36 "decline_voting_rights" DeclineVotingRights(DeclineVotingRightsOperation) false;
    37 "reset_account" ResetAccount(ResetAccountOperation) false;
    38 "set_reset_account" SetResetAccount(SetResetAccountOperation) false;
    39 "claim_reward_balance" ClaimRewardBalance(ClaimRewardBalanceOperation) false;
    40 "delegate_vesting_shares" DelegateVestingShares(DelegateVestingSharesOperation) false;
    41 "account_create_with_delegation" AccountCreateWithDelegation(AccountCreateWithDelegationOperation) false;
    42 "witness_set_properties" WitnessSetProperties(WitnessSetPropertiesOperation) false;
    43 "account_update2" AccountUpdate2(AccountUpdate2Operation) false;
    44 "create_proposal" CreateProposal(CreateProposalOperation) false;
    45 "update_proposal_votes" UpdateProposalVotes(UpdateProposalVotesOperation) false;
    46 "remove_proposal" RemoveProposal(RemoveProposalOperation) false;
    47 "fill_convert_request" FillConvertRequest(FillConvertRequestOperation) true;
    48 "author_reward" AuthorReward(AuthorRewardOperation) true;
    49 "curation_reward" CurationReward(CurationRewardOperation) true;
    50 "comment_reward" CommentReward(CommentRewardOperation) true;
    51 "liquidity_reward" LiquidityReward(LiquidityRewardOperation) true;
    52 "interest" Interest(InterestOperation) true;
    53 "fill_vesting_withdraw" FillVestingWithdraw(FillVestingWithdrawOperation) true;
    54 "fill_order" FillOrder(FillOrderOperation) true;
    55 "shutdown_witness" ShutdownWitness(ShutdownWitnessOperation) true;
    56 "fill_transfer_from_savings" FillTransferFromSavings(FillTransferFromSavingsOperation) true;
    57 "hardfork" Hardfork(HardforkOperation) true;
    58 "comment_payout_update" CommentPayoutUpdate(CommentPayoutUpdateOperation) true;
    59 "return_vesting_delegation" ReturnVestingDelegation(ReturnVestingDelegationOperation) true;
    60 "comment_benefactor_reward" CommentBenefactorReward(CommentBenefactorRewardOperation) true;
    61 "producer_reward" ProducerReward(ProducerRewardOperation) true;
    62 "clear_null_account_balance" ClearNullAccountBalance(ClearNullAccountBalanceOperation) true;
    63 "proposal_pay" ProposalPay(ProposalPayOperation) true;
    64 "sps_fund" SpsFund(SpsFundOperation) true;
}

impl Operation {
    /// JSON name, including the name of an unknown JSON operation.
    pub fn name(&self) -> Option<&str> {
        match self {
            Operation::Unknown(UnknownOperation::Json { name, .. }) => Some(name),
            Operation::Unknown(UnknownOperation::Binary { .. }) => None,
            op => op.kind().map(OperationKind::name),
        }
    }

    pub fn is_virtual(&self) -> bool {
        self.kind().is_some_and(OperationKind::is_virtual)
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, Operation::Unknown(_))
    }

    /// Whether this operation can appear in a signed transaction.
    pub fn is_encodable(&self) -> bool {
        self.kind().is_some_and(|kind| !kind.is_virtual())
    }
}

impl BinaryEncode for Operation {
    fn binary_encode(&self, w: &mut BinaryWriter) -> Result<()> {
        match self.kind() {
            Some(kind) if kind.is_virtual() => Err(CoreError::NotEncodable(format!(
                "virtual operation {}",
                kind.name()
            ))),
            Some(kind) => {
                w.write_varint(kind.id());
                self.encode_payload(w)
            }
            None => self.encode_payload(w),
        }
    }
}

impl BinaryDecode for Operation {
    /// An unknown id yields [`UnknownOperation::Binary`] holding the rest of the input.
    fn binary_decode(r: &mut BinaryReader<'_>) -> Result<Self> {
        let id = r.read_varint()?;
        match OperationKind::from_id(id) {
            Some(kind) => Operation::decode_payload(kind, r),
            None => {
                trace!(id, remaining = r.remaining(), "decoded unknown operation");
                let data = Bytes::copy_from_slice(r.read_rest());
                Ok(Operation::Unknown(UnknownOperation::Binary { id, data }))
            }
        }
    }
}

impl Serialize for Operation {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let Some(kind) = self.kind() else {
            return match self {
                Operation::Unknown(op) => Err(S::Error::custom(CoreError::NotEncodable(op.to_string()))),
                _ => Err(S::Error::custom("operation has no kind")),
            };
        };
        let mut tuple = serializer.serialize_tuple(2)?;
        tuple.serialize_element(kind.name())?;
        self.serialize_payload(&mut tuple)?;
        tuple.end()
    }
}

struct OperationVisitor;

impl<'de> Visitor<'de> for OperationVisitor {
    type Value = Operation;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("an operation as a [name, fields] pair")
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> std::result::Result<Operation, A::Error> {
        let name: String = seq
            .next_element()?
            .ok_or_else(|| de::Error::invalid_length(0, &self))?;
        let op = match OperationKind::from_name(&name) {
            Some(kind) => Operation::next_payload(kind, &mut seq)?,
            None => {
                trace!(name = %name, "decoded unknown operation");
                seq.next_element::<serde_json::Value>()?
                    .map(|value| Operation::Unknown(UnknownOperation::Json { name, value }))
            }
        }
        .ok_or_else(|| de::Error::invalid_length(1, &self))?;
        if seq.next_element::<IgnoredAny>()?.is_some() {
            return Err(de::Error::invalid_length(3, &self));
        }
        Ok(op)
    }
}

impl<'de> Deserialize<'de> for Operation {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        deserializer.deserialize_seq(OperationVisitor)
    }
}
