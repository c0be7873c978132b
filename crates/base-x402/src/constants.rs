use alloy::primitives::Address;

/// Base mainnet chain ID.
pub const CHAIN_ID: u64 = 8453;

/// CAIP-2 network identifier for Base mainnet.
pub const NETWORK: &str = "eip155:8453";

/// The only payment scheme currently accepted. New schemes extend the
/// `accepts` list in [`crate::payment::PaymentRequirements`].
pub const SCHEME_EXACT: &str = "exact";

/// x402 protocol version advertised in payment requirements.
pub const X402_VERSION: u32 = 1;

/// USDC contract address on Base mainnet.
pub const USDC_ADDRESS: Address = Address::new([
    0x83, 0x35, 0x89, 0xfc, 0xd6, 0xed, 0xb6, 0xe0, 0x8f, 0x4c, 0x7c, 0x32, 0xd4, 0xf7, 0x1b,
    0x54, 0xbd, 0xa0, 0x29, 0x13,
]);

/// USDC has 6 decimal places.
pub const TOKEN_DECIMALS: u32 = 6;

/// Default facilitator endpoint.
pub const DEFAULT_FACILITATOR_URL: &str = "https://x402.org/facilitator";

/// Request header carrying the caller's payment proof.
pub const PAYMENT_HEADER: &str = "X-PAYMENT";

/// Response header duplicating the payment requirements for machine discovery.
pub const PAYMENT_REQUIREMENTS_HEADER: &str = "X-Payment-Requirements";
