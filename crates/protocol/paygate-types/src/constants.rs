//! Wire constants of the gateway protocol.
//!
//! Names are the literal keys exchanged with the gateway. Gateway-reserved
//! keys carry the `vpc_` prefix, caller keys carry `user_`.

// =============================================================================
// Namespace Prefixes
// =============================================================================

/// Prefix of gateway-reserved fields.
pub const GATEWAY_PREFIX: &str = "vpc_";

/// Prefix of caller-supplied custom fields.
pub const CUSTOM_PREFIX: &str = "user_";

// =============================================================================
// Gateway Fields
// =============================================================================

pub const FIELD_VERSION: &str = "vpc_Version";
pub const FIELD_CURRENCY: &str = "vpc_Currency";
pub const FIELD_COMMAND: &str = "vpc_Command";
pub const FIELD_ACCESS_CODE: &str = "vpc_AccessCode";
pub const FIELD_MERCHANT: &str = "vpc_Merchant";
pub const FIELD_LOCALE: &str = "vpc_Locale";
pub const FIELD_RETURN_URL: &str = "vpc_ReturnURL";
pub const FIELD_USER: &str = "vpc_User";
pub const FIELD_PASSWORD: &str = "vpc_Password";

/// Merchant transaction reference (the caller's request code).
pub const FIELD_MERCH_TXN_REF: &str = "vpc_MerchTxnRef";

/// Order information (the caller's order code).
pub const FIELD_ORDER_INFO: &str = "vpc_OrderInfo";

/// Amount in minor units.
pub const FIELD_AMOUNT: &str = "vpc_Amount";

/// Client IP address of the paying browser.
pub const FIELD_TICKET_NO: &str = "vpc_TicketNo";

/// Gateway-assigned transaction response code.
pub const FIELD_TXN_RESPONSE_CODE: &str = "vpc_TxnResponseCode";

/// Signature field. Never part of the signed input.
pub const FIELD_SECURE_HASH: &str = "vpc_SecureHash";

// =============================================================================
// Reserved Custom Fields
// =============================================================================

/// Transaction type tag echoed back by the gateway.
pub const FIELD_TRANSACTION_TYPE: &str = "user_Type";

/// Where the caller wants the browser sent after the callback is processed.
pub const FIELD_CALLER_RETURN_URL: &str = "user_returnUrl";

/// Custom keys (prefix stripped) that are protocol metadata, not caller data.
pub const RESERVED_CUSTOM_KEYS: &[&str] = &["Type", "returnUrl"];

// =============================================================================
// Fixed Values
// =============================================================================

/// Protocol version sent in every request.
pub const PROTOCOL_VERSION: &str = "2";

/// Command for a payment redirect.
pub const COMMAND_PAY: &str = "pay";

/// Command for an out-of-band status query.
pub const COMMAND_QUERY_DR: &str = "queryDR";

/// Response code meaning the gateway approved the transaction.
pub const RESPONSE_CODE_APPROVED: &str = "0";

/// Minor units per major unit.
pub const MINOR_UNITS_PER_MAJOR: u64 = 100;

// =============================================================================
// Endpoints
// =============================================================================

/// Payment redirect endpoint, relative to the gateway base URL.
pub const PAYMENT_ENDPOINT: &str = "/paygate/vpcpay.op";

/// Status query endpoint, relative to the gateway base URL.
pub const QUERY_ENDPOINT: &str = "/msp/api/v1/vpc/invoices/queries";

/// Body returned to the gateway to acknowledge a server-to-server notification.
pub const NOTIFICATION_ACK: &str = "responsecode=1&desc=confirm-success";
