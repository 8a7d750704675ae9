//! User-submitted operations.
//!
//! Field order is the wire order and must match the network's definitions.

use crate::asset::{Asset, Price};
use crate::authority::Authority;
use crate::extensions::{CommentOptionsExtension, FutureExtension};
use crate::keys::PublicKey;
use crate::time::TimePointSec;
use crate::types::HexBytes;

wire_struct!(
    /// Vote on a post. Weight is in basis points, negative for a downvote.
    VoteOperation {
        voter: String,
        author: String,
        permlink: String,
        weight: i16,
    }
);

wire_struct!(
    /// Create or edit a post or reply.
    CommentOperation {
        parent_author: String,
        parent_permlink: String,
        author: String,
        permlink: String,
        title: String,
        body: String,
        json_metadata: String,
    }
);

wire_struct!(
    TransferOperation {
        from: String,
        to: String,
        amount: Asset,
        memo: String,
    }
);

wire_struct!(
    /// Convert liquid tokens to vesting shares.
    TransferToVestingOperation {
        from: String,
        to: String,
        amount: Asset,
    }
);

wire_struct!(
    WithdrawVestingOperation {
        account: String,
        vesting_shares: Asset,
    }
);

wire_struct!(
    LimitOrderCreateOperation {
        owner: String,
        orderid: u32,
        amount_to_sell: Asset,
        min_to_receive: Asset,
        fill_or_kill: bool,
        expiration: TimePointSec,
    }
);

wire_struct!(
    LimitOrderCancelOperation {
        owner: String,
        orderid: u32,
    }
);

wire_struct!(
    /// Witness price feed.
    FeedPublishOperation {
        publisher: String,
        exchange_rate: Price,
    }
);

wire_struct!(
    /// Convert SBD to STEEM at the median feed price.
    ConvertOperation {
        owner: String,
        requestid: u32,
        amount: Asset,
    }
);

wire_struct!(
    AccountCreateOperation {
        fee: Asset,
        creator: String,
        new_account_name: String,
        owner: Authority,
        active: Authority,
        posting: Authority,
        memo_key: PublicKey,
        json_metadata: String,
    }
);

wire_struct!(
    /// Update an account's authorities and metadata. Absent authorities stay unchanged.
    AccountUpdateOperation {
        account: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        owner: Option<Authority>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        active: Option<Authority>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        posting: Option<Authority>,
        memo_key: PublicKey,
        json_metadata: String,
    }
);

wire_struct!(
    /// Chain parameters a witness votes for.
    ChainProperties {
        account_creation_fee: Asset,
        maximum_block_size: u32,
        sbd_interest_rate: u16,
    }
);

wire_struct!(
    WitnessUpdateOperation {
        owner: String,
        url: String,
        block_signing_key: PublicKey,
        props: ChainProperties,
        fee: Asset,
    }
);

wire_struct!(
    AccountWitnessVoteOperation {
        account: String,
        witness: String,
        approve: bool,
    }
);

wire_struct!(
    /// Delegate witness votes to a proxy. An empty proxy clears it.
    AccountWitnessProxyOperation {
        account: String,
        proxy: String,
    }
);

wire_struct!(
    CustomOperation {
        required_auths: Vec<String>,
        id: u16,
        data: HexBytes,
    }
);

wire_struct!(
    DeleteCommentOperation {
        author: String,
        permlink: String,
    }
);

wire_struct!(
    /// Application-defined JSON payload, e.g. follows and reblogs.
    CustomJsonOperation {
        required_auths: Vec<String>,
        required_posting_auths: Vec<String>,
        id: String,
        json: String,
    }
);

wire_struct!(
    CommentOptionsOperation {
        author: String,
        permlink: String,
        max_accepted_payout: Asset,
        /// Basis points of the payout taken as SBD.
        percent_steem_dollars: u16,
        allow_votes: bool,
        allow_curation_rewards: bool,
        extensions: Vec<CommentOptionsExtension>,
    }
);

wire_struct!(
    SetWithdrawVestingRouteOperation {
        from_account: String,
        to_account: String,
        percent: u16,
        auto_vest: bool,
    }
);

wire_struct!(
    LimitOrderCreate2Operation {
        owner: String,
        orderid: u32,
        amount_to_sell: Asset,
        exchange_rate: Price,
        fill_or_kill: bool,
        expiration: TimePointSec,
    }
);

wire_struct!(
    /// Pay for an account creation token.
    ClaimAccountOperation {
        creator: String,
        fee: Asset,
        extensions: Vec<FutureExtension>,
    }
);

wire_struct!(
    /// Create an account using a previously claimed token.
    CreateClaimedAccountOperation {
        creator: String,
        new_account_name: String,
        owner: Authority,
        active: Authority,
        posting: Authority,
        memo_key: PublicKey,
        json_metadata: String,
        extensions: Vec<FutureExtension>,
    }
);

wire_struct!(
    RequestAccountRecoveryOperation {
        recovery_account: String,
        account_to_recover: String,
        new_owner_authority: Authority,
        extensions: Vec<FutureExtension>,
    }
);

wire_struct!(
    RecoverAccountOperation {
        account_to_recover: String,
        new_owner_authority: Authority,
        recent_owner_authority: Authority,
        extensions: Vec<FutureExtension>,
    }
);

wire_struct!(
    ChangeRecoveryAccountOperation {
        account_to_recover: String,
        new_recovery_account: String,
        extensions: Vec<FutureExtension>,
    }
);

wire_struct!(
    EscrowTransferOperation {
        from: String,
        to: String,
        sbd_amount: Asset,
        steem_amount: Asset,
        escrow_id: u32,
        agent: String,
        fee: Asset,
        json_meta: String,
        ratification_deadline: TimePointSec,
        escrow_expiration: TimePointSec,
    }
);

wire_struct!(
    EscrowDisputeOperation {
        from: String,
        to: String,
        agent: String,
        who: String,
        escrow_id: u32,
    }
);

wire_struct!(
    EscrowReleaseOperation {
        from: String,
        to: String,
        agent: String,
        who: String,
        receiver: String,
        escrow_id: u32,
        sbd_amount: Asset,
        steem_amount: Asset,
    }
);

wire_struct!(
    EscrowApproveOperation {
        from: String,
        to: String,
        agent: String,
        who: String,
        escrow_id: u32,
        approve: bool,
    }
);

wire_struct!(
    TransferToSavingsOperation {
        from: String,
        to: String,
        amount: Asset,
        memo: String,
    }
);

wire_struct!(
    TransferFromSavingsOperation {
        from: String,
        request_id: u32,
        to: String,
        amount: Asset,
        memo: String,
    }
);

wire_struct!(
    CancelTransferFromSavingsOperation {
        from: String,
        request_id: u32,
    }
);

wire_struct!(
    CustomBinaryOperation {
        required_owner_auths: Vec<String>,
        required_active_auths: Vec<String>,
        required_posting_auths: Vec<String>,
        required_auths: Vec<Authority>,
        id: String,
        data: HexBytes,
    }
);

wire_struct!(
    DeclineVotingRightsOperation {
        account: String,
        decline: bool,
    }
);

wire_struct!(
    ResetAccountOperation {
        reset_account: String,
        account_to_reset: String,
        new_owner_authority: Authority,
    }
);

wire_struct!(
    SetResetAccountOperation {
        account: String,
        current_reset_account: String,
        reset_account: String,
    }
);

wire_struct!(
    ClaimRewardBalanceOperation {
        account: String,
        reward_steem: Asset,
        reward_sbd: Asset,
        reward_vests: Asset,
    }
);

wire_struct!(
    /// Lend vesting shares. A zero amount removes the delegation.
    DelegateVestingSharesOperation {
        delegator: String,
        delegatee: String,
        vesting_shares: Asset,
    }
);

wire_struct!(
    AccountCreateWithDelegationOperation {
        fee: Asset,
        delegation: Asset,
        creator: String,
        new_account_name: String,
        owner: Authority,
        active: Authority,
        posting: Authority,
        memo_key: PublicKey,
        json_metadata: String,
        extensions: Vec<FutureExtension>,
    }
);

wire_struct!(
    /// Witness properties as serialized key/value pairs, in ascending key order.
    WitnessSetPropertiesOperation {
        owner: String,
        props: Vec<(String, HexBytes)>,
        extensions: Vec<FutureExtension>,
    }
);

wire_struct!(
    AccountUpdate2Operation {
        account: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        owner: Option<Authority>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        active: Option<Authority>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        posting: Option<Authority>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        memo_key: Option<PublicKey>,
        json_metadata: String,
        posting_json_metadata: String,
        extensions: Vec<FutureExtension>,
    }
);

wire_struct!(
    CreateProposalOperation {
        creator: String,
        receiver: String,
        start_date: TimePointSec,
        end_date: TimePointSec,
        daily_pay: Asset,
        subject: String,
        permlink: String,
        extensions: Vec<FutureExtension>,
    }
);

wire_struct!(
    UpdateProposalVotesOperation {
        voter: String,
        proposal_ids: Vec<i64>,
        approve: bool,
        extensions: Vec<FutureExtension>,
    }
);

wire_struct!(
    RemoveProposalOperation {
        proposal_owner: String,
        proposal_ids: Vec<i64>,
        extensions: Vec<FutureExtension>,
    }
);
