//! Ports layer for the liquidity gateway.

pub mod inbound;

pub use inbound::LiquidityGatewayApi;
