//! Swap route configuration
//!
//! Routes are configured as a comma-separated list of `tokenIn>tokenOut`
//! pairs, for example:
//!
//! ```bash
//! export ROUTES="0xTokenA>0xTokenB,0xTokenB>0xTokenA"
//! ```

use crate::{Error, Result};
use alloy::primitives::Address;
use std::fmt;
use std::str::FromStr;

/// Separator between the two tokens of a route
pub const ROUTE_ARROW: char = '>';

/// An ordered (tokenIn, tokenOut) pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Route {
    pub token_in: Address,
    pub token_out: Address,
}

impl Route {
    pub fn new(token_in: Address, token_out: Address) -> Self {
        Self {
            token_in,
            token_out,
        }
    }

    /// Swap path handed to the router
    pub fn path(&self) -> Vec<Address> {
        vec![self.token_in, self.token_out]
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.token_in, self.token_out)
    }
}

impl FromStr for Route {
    type Err = Error;

    fn from_str(entry: &str) -> Result<Self> {
        let tokens: Vec<&str> = entry.split(ROUTE_ARROW).map(str::trim).collect();
        let [token_in, token_out] = tokens.as_slice() else {
            return Err(Error::Config(format!(
                "Route '{}' must name exactly two tokens as tokenIn{}tokenOut",
                entry, ROUTE_ARROW
            )));
        };

        Ok(Self::new(
            parse_token(token_in, entry)?,
            parse_token(token_out, entry)?,
        ))
    }
}

fn parse_token(token: &str, entry: &str) -> Result<Address> {
    Address::from_str(token).map_err(|e| {
        Error::Config(format!(
            "Invalid token address '{}' in route '{}': {}",
            token, entry, e
        ))
    })
}

/// Parse the configured route list, preserving order.
pub fn parse_routes(list: &str) -> Result<Vec<Route>> {
    let routes = list
        .split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(Route::from_str)
        .collect::<Result<Vec<_>>>()?;

    if routes.is_empty() {
        return Err(Error::Config("No swap routes configured".to_string()));
    }

    Ok(routes)
}
