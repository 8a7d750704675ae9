//! Virtual operations: state changes the ledger records on its own.
//!
//! These appear in account history and block effects but never in a signed
//! transaction, so they are decode-only in binary form.

use crate::asset::Asset;
use crate::types::TransactionId;

wire_struct!(
    FillConvertRequestOperation {
        owner: String,
        requestid: u32,
        amount_in: Asset,
        amount_out: Asset,
    }
);

wire_struct!(
    AuthorRewardOperation {
        author: String,
        permlink: String,
        sbd_payout: Asset,
        steem_payout: Asset,
        vesting_payout: Asset,
    }
);

wire_struct!(
    CurationRewardOperation {
        curator: String,
        reward: Asset,
        comment_author: String,
        comment_permlink: String,
    }
);

wire_struct!(
    CommentRewardOperation {
        author: String,
        permlink: String,
        payout: Asset,
    }
);

wire_struct!(
    LiquidityRewardOperation {
        owner: String,
        payout: Asset,
    }
);

wire_struct!(
    /// SBD interest paid to a holder.
    InterestOperation {
        owner: String,
        interest: Asset,
    }
);

wire_struct!(
    FillVestingWithdrawOperation {
        from_account: String,
        to_account: String,
        withdrawn: Asset,
        deposited: Asset,
    }
);

wire_struct!(
    FillOrderOperation {
        current_owner: String,
        current_orderid: u32,
        current_pays: Asset,
        open_owner: String,
        open_orderid: u32,
        open_pays: Asset,
    }
);

wire_struct!(
    ShutdownWitnessOperation {
        owner: String,
    }
);

wire_struct!(
    FillTransferFromSavingsOperation {
        from: String,
        to: String,
        amount: Asset,
        request_id: u32,
        memo: String,
    }
);

wire_struct!(
    HardforkOperation {
        hardfork_id: u32,
    }
);

wire_struct!(
    CommentPayoutUpdateOperation {
        author: String,
        permlink: String,
    }
);

wire_struct!(
    ReturnVestingDelegationOperation {
        account: String,
        vesting_shares: Asset,
    }
);

wire_struct!(
    CommentBenefactorRewardOperation {
        benefactor: String,
        author: String,
        permlink: String,
        sbd_payout: Asset,
        steem_payout: Asset,
        vesting_payout: Asset,
    }
);

wire_struct!(
    /// Block production reward.
    ProducerRewardOperation {
        producer: String,
        vesting_shares: Asset,
    }
);

wire_struct!(
    ClearNullAccountBalanceOperation {
        total_cleared: Vec<Asset>,
    }
);

wire_struct!(
    /// Daily payment from the proposal fund.
    ProposalPayOperation {
        receiver: String,
        payment: Asset,
        trx_id: TransactionId,
        op_in_trx: u16,
    }
);

wire_struct!(
    SpsFundOperation {
        additional_funds: Asset,
    }
);
