use crate::hyperliquid::HyperliquidClient;
use crate::tools::{
    funding::{
        GetFundingRatesTool, GetMarketFundingRateTool, GetNextFundingTimeTool,
        GetPredictedFundingsTool,
    },
    markets::{GetAllMidsTool, GetMarketPriceTool, GetMarketsTool, GetMetaTool},
    positions::{
        GetOpenOrdersTool, GetTraderPositionForMarketTool, GetTraderPositionsTool,
        GetUserFillsTool,
    },
    vaults::{
        CalculateVaultMetricsTool, GetUserSubAccountsTool, GetUserVaultEquitiesTool,
        GetVaultDetailsTool, GetVaultPortfolioDataTool, GetVaultStrategiesTool,
        IsValidVaultAddressTool,
    },
    Tool,
};
use anyhow::Result;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::io::{self, BufRead};
use tracing::{debug, error, info};

#[derive(Serialize, Deserialize, Debug)]
struct JsonRpcRequest {
    jsonrpc: String,
    method: String,
    params: Option<Value>,
    id: Option<Value>,
}

#[derive(Serialize, Deserialize, Debug)]
struct JsonRpcResponse {
    jsonrpc: String,
    result: Option<Value>,
    error: Option<JsonRpcError>,
    id: Option<Value>,
}

#[derive(Serialize, Deserialize, Debug)]
struct JsonRpcError {
    code: i32,
    message: String,
    data: Option<Value>,
}

fn register(tools: &mut HashMap<String, Box<dyn Tool>>, tool: impl Tool + 'static) {
    tools.insert(tool.name().to_string(), Box::new(tool));
}

fn registry() -> HashMap<String, Box<dyn Tool>> {
    let mut tools: HashMap<String, Box<dyn Tool>> = HashMap::new();

    register(&mut tools, GetTraderPositionsTool);
    register(&mut tools, GetTraderPositionForMarketTool);
    register(&mut tools, GetOpenOrdersTool);
    register(&mut tools, GetUserFillsTool);

    register(&mut tools, GetMarketsTool);
    register(&mut tools, GetMarketPriceTool);
    register(&mut tools, GetMetaTool);
    register(&mut tools, GetAllMidsTool);

    register(&mut tools, GetFundingRatesTool);
    register(&mut tools, GetPredictedFundingsTool);
    register(&mut tools, GetMarketFundingRateTool);
    register(&mut tools, GetNextFundingTimeTool);

    register(&mut tools, GetVaultDetailsTool);
    register(&mut tools, GetUserVaultEquitiesTool);
    register(&mut tools, GetUserSubAccountsTool);
    register(&mut tools, CalculateVaultMetricsTool);
    register(&mut tools, GetVaultPortfolioDataTool);
    register(&mut tools, IsValidVaultAddressTool);
    register(&mut tools, GetVaultStrategiesTool);

    tools
}

pub async fn run(client: HyperliquidClient) -> Result<()> {
    let tools = registry();

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    info!("MCP Server Ready. Waiting for JSON-RPC requests on stdin...");

    while let Some(Ok(line)) = lines.next() {
        if line.trim().is_empty() {
            continue;
        }

        debug!("Received request: {}", line);

        let req: JsonRpcRequest = match serde_json::from_str(&line) {
            Ok(r) => r,
            Err(e) => {
                error!("Failed to parse JSON-RPC request: {}", e);
                continue;
            }
        };

        // Notifications carry no id and expect no response.
        if req.id.is_none() {
            debug!("Ignoring notification: {}", req.method);
            continue;
        }

        let response = handle_request(&req, &client, &tools).await;

        let response_str = serde_json::to_string(&response)?;
        println!("{}", response_str);
    }

    Ok(())
}

async fn handle_request(
    req: &JsonRpcRequest,
    client: &HyperliquidClient,
    tools: &HashMap<String, Box<dyn Tool>>,
) -> JsonRpcResponse {
    match req.method.as_str() {
        "initialize" => JsonRpcResponse {
            jsonrpc: "2.0".into(),
            result: Some(json!({
                "protocolVersion": "2024-11-05",
                "capabilities": { "tools": {} },
                "serverInfo": {
                    "name": "hyperliquid-mcp",
                    "version": env!("CARGO_PKG_VERSION")
                }
            })),
            error: None,
            id: req.id.clone(),
        },
        "tools/list" => {
            let tool_list: Vec<Value> = tools
                .values()
                .map(|t| {
                    json!({
                        "name": t.name(),
                        "description": t.description(),
                        "inputSchema": t.schema()
                    })
                })
                .collect();

            JsonRpcResponse {
                jsonrpc: "2.0".into(),
                result: Some(json!({ "tools": tool_list })),
                error: None,
                id: req.id.clone(),
            }
        }
        "tools/call" => {
            if let Some(params) = &req.params {
                let name = params.get("name").and_then(|v| v.as_str());
                let args = params.get("arguments").cloned().unwrap_or(json!({}));

                if let Some(tool_name) = name {
                    if let Some(tool) = tools.get(tool_name) {
                        match tool.call(client, args).await {
                            Ok(result) => JsonRpcResponse {
                                jsonrpc: "2.0".into(),
                                // Standard MCP 'content' for compatibility, plus 'data' for agents.
                                result: Some(json!({
                                    "content": [{
                                        "type": "text",
                                        "text": serde_json::to_string_pretty(&result).unwrap_or_else(|_| result.to_string())
                                    }],
                                    "data": result
                                })),
                                error: None,
                                id: req.id.clone(),
                            },
                            // Tool failures (bad address, vault not found) surface as
                            // error-flagged content, never as protocol errors.
                            Err(e) => JsonRpcResponse {
                                jsonrpc: "2.0".into(),
                                result: Some(json!({
                                    "content": [{
                                        "type": "text",
                                        "text": format!("Error in {}: {}", tool_name, e)
                                    }],
                                    "isError": true
                                })),
                                error: None,
                                id: req.id.clone(),
                            },
                        }
                    } else {
                        JsonRpcResponse {
                            jsonrpc: "2.0".into(),
                            result: None,
                            error: Some(JsonRpcError {
                                code: -32601,
                                message: format!("Tool not found: {}", tool_name),
                                data: None,
                            }),
                            id: req.id.clone(),
                        }
                    }
                } else {
                    JsonRpcResponse {
                        jsonrpc: "2.0".into(),
                        result: None,
                        error: Some(JsonRpcError {
                            code: -32602,
                            message: "Missing 'name' parameter".into(),
                            data: None,
                        }),
                        id: req.id.clone(),
                    }
                }
            } else {
                JsonRpcResponse {
                    jsonrpc: "2.0".into(),
                    result: None,
                    error: Some(JsonRpcError {
                        code: -32602,
                        message: "Missing params".into(),
                        data: None,
                    }),
                    id: req.id.clone(),
                }
            }
        }
        _ => JsonRpcResponse {
            jsonrpc: "2.0".into(),
            result: None,
            error: Some(JsonRpcError {
                code: -32601,
                message: "Method not found".into(),
                data: None,
            }),
            id: req.id.clone(),
        },
    }
}
