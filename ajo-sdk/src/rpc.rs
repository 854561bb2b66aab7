// This file is part of Gear.

// Copyright (C) 2025 Gear Technologies Inc.
// SPDX-License-Identifier: GPL-3.0-or-later WITH Classpath-exception-2.0

// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.

// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU General Public License for more details.

// You should have received a copy of the GNU General Public License
// along with this program. If not, see <https://www.gnu.org/licenses/>.

//! Sui JSON-RPC transport.

use crate::{
    result::{Error, Result},
    transport::Transport,
    types::{Balance, Coin, CoinPage, ExecutionResponse, ObjectData, ObjectResponse},
};
use ajo_primitives::{Address, ObjectId};
use async_trait::async_trait;
use jsonrpsee::{
    core::client::ClientT,
    http_client::{HttpClient, HttpClientBuilder},
    rpc_params,
};
use serde_json::json;
use std::time::Duration;
use url::Url;

/// SUI coin type.
pub const SUI_COIN_TYPE: &str = "0x2::sui::SUI";

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// JSON-RPC transport over HTTP.
#[derive(Clone)]
pub struct RpcTransport {
    rpc: HttpClient,
    url: Url,
}

impl RpcTransport {
    pub const MAINNET_ENDPOINT: &'static str = "https://fullnode.mainnet.sui.io:443";
    pub const TESTNET_ENDPOINT: &'static str = "https://fullnode.testnet.sui.io:443";
    pub const DEVNET_ENDPOINT: &'static str = "https://fullnode.devnet.sui.io:443";
    pub const LOCALNET_ENDPOINT: &'static str = "http://127.0.0.1:9000";

    /// Create new transport with the default timeout.
    pub fn new(uri: &str) -> Result<Self> {
        Self::with_timeout(uri, DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(uri: &str, timeout: Duration) -> Result<Self> {
        let url = Url::parse(uri).map_err(|_| Error::InvalidUrl)?;
        let rpc = HttpClientBuilder::default()
            .request_timeout(timeout)
            .build(url.as_str())?;

        tracing::debug!("Connected to {url} (timeout {timeout:?})");
        Ok(Self { rpc, url })
    }

    /// Endpoint this transport talks to.
    pub fn url(&self) -> &Url {
        &self.url
    }
}

#[async_trait]
impl Transport for RpcTransport {
    /// suix_getReferenceGasPrice
    async fn reference_gas_price(&self) -> Result<u64> {
        let price: String = self
            .rpc
            .request("suix_getReferenceGasPrice", rpc_params![])
            .await?;

        price
            .parse()
            .map_err(|_| Error::MalformedObjectData(format!("gas price {price:?}")))
    }

    /// suix_getCoins
    async fn coins(&self, owner: Address) -> Result<Vec<Coin>> {
        let page: CoinPage = self
            .rpc
            .request(
                "suix_getCoins",
                rpc_params![owner, SUI_COIN_TYPE, Option::<String>::None, Option::<u64>::None],
            )
            .await?;

        if page.has_next_page {
            tracing::debug!("{owner} owns more coins than fit one page");
        }

        Ok(page.data)
    }

    /// sui_getObject
    async fn object(&self, id: ObjectId) -> Result<Option<ObjectData>> {
        let response: ObjectResponse = self
            .rpc
            .request(
                "sui_getObject",
                rpc_params![id, json!({ "showOwner": true, "showContent": true })],
            )
            .await?;

        if let Some(error) = &response.error {
            tracing::debug!("sui_getObject({id}): {error}");
        }

        Ok(response.data)
    }

    /// suix_getBalance
    async fn balance(&self, owner: Address) -> Result<Option<u64>> {
        let balance: Option<Balance> = self
            .rpc
            .request("suix_getBalance", rpc_params![owner, SUI_COIN_TYPE])
            .await?;

        Ok(balance.map(|b| b.total_balance))
    }

    /// sui_executeTransactionBlock
    async fn execute(
        &self,
        tx_bytes: String,
        signatures: Vec<String>,
    ) -> Result<ExecutionResponse> {
        self.rpc
            .request(
                "sui_executeTransactionBlock",
                rpc_params![
                    tx_bytes,
                    signatures,
                    json!({
                        "showEffects": true,
                        "showObjectChanges": true,
                        "showEvents": true,
                    }),
                    "WaitForLocalExecution"
                ],
            )
            .await
            .map_err(Into::into)
    }
}
