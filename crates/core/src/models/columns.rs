// Column labels of the published spreadsheet feeds. The sheet is kept in
// Traditional Chinese; every lookup goes through these constants so a
// renamed column needs exactly one edit here.

// ── Holdings feed ───────────────────────────────────────────────────

/// Stock code.
pub const CODE: &str = "股票代號";
/// Total capital invested.
pub const COST_BASIS: &str = "總投入本金";
/// Current market value.
pub const MARKET_VALUE: &str = "目前市值";
/// Unrealized gain/loss.
pub const UNREALIZED_GAIN: &str = "帳面損益";
/// Accumulated share count.
pub const SHARES: &str = "累積總股數";
/// Average cost per share.
pub const AVG_COST: &str = "平均成本";
/// Latest price per share.
pub const CURRENT_PRICE: &str = "目前股價";

// ── Transactions feed ───────────────────────────────────────────────

/// Date (shared with the dividends, announcements and activity feeds).
pub const DATE: &str = "日期";
/// Transaction type.
pub const TXN_KIND: &str = "交易類別";
/// Price per share at execution.
pub const UNIT_PRICE: &str = "成交單價";
/// Amount invested.
pub const INVESTED: &str = "投入金額";
/// Shares traded.
pub const SHARE_COUNT: &str = "股數";
/// Broker fee.
pub const FEE: &str = "手續費";

// ── Dividends feed ──────────────────────────────────────────────────

/// Dividend season.
pub const SEASON: &str = "配息季度";
/// Dividend per share.
pub const PER_SHARE: &str = "每股配息";
/// Amount received.
pub const AMOUNT_RECEIVED: &str = "實收金額";
/// Payout status.
pub const STATUS: &str = "狀態";

// ── Announcements / recent activity ─────────────────────────────────

/// Announcement category.
pub const CATEGORY: &str = "類別";
/// Announcement body.
pub const MESSAGE: &str = "內容";
/// Activity description.
pub const ACTIVITY: &str = "事件";

// ── Stock-name map ──────────────────────────────────────────────────

/// Display name for a stock code.
pub const STOCK_NAME: &str = "股票名稱";

/// Markers identifying subtotal rows in the holdings feed. Matched as
/// substrings of the raw code cell, case-sensitive as received.
pub const SUBTOTAL_MARKERS: [&str; 2] = ["計", "Total"];
