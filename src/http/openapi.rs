//! OpenAPI description of the HTTP API.
//!
//! Served as-is from `GET /openapi.json`. Property names mirror the serde
//! field names of `UrlcountsRequest` and `MatchResult`.

use axum::Json;
use serde_json::{json, Value};

/// `GET /openapi.json`: the OpenAPI 3 document for this service.
pub async fn get_openapi() -> Json<Value> {
    Json(document())
}

/// Build the OpenAPI 3 document.
pub fn document() -> Value {
    json!({
        "openapi": "3.0.3",
        "info": {
            "title": "urlcounts",
            "description": "Count how many submitted URLs match a known host list.",
            "version": env!("CARGO_PKG_VERSION"),
        },
        "paths": {
            "/urlcounts": {
                "post": {
                    "summary": "Match a URL batch against the host list",
                    "requestBody": {
                        "required": true,
                        "content": {
                            "application/json": {
                                "schema": { "$ref": "#/components/schemas/UrlcountsRequest" }
                            }
                        }
                    },
                    "responses": {
                        "200": {
                            "description": "Match statistics for the distinct submitted URLs.",
                            "content": {
                                "application/json": {
                                    "schema": { "$ref": "#/components/schemas/MatchResult" }
                                }
                            }
                        },
                        "400": text_response("Body is not valid JSON, or `urls` is empty."),
                        "413": text_response("Body exceeds the configured size limit."),
                        "422": text_response("Body is missing, or `urls` is absent, null or not a list of strings."),
                        "500": text_response("Host list could not be read. Body starts with `Unexpected error: `."),
                    }
                }
            },
            "/status": {
                "get": {
                    "summary": "Service liveness and host list settings",
                    "responses": {
                        "200": {
                            "description": "Service status.",
                            "content": {
                                "application/json": {
                                    "schema": { "$ref": "#/components/schemas/SystemStatus" }
                                }
                            }
                        }
                    }
                }
            }
        },
        "components": {
            "schemas": {
                "UrlcountsRequest": {
                    "type": "object",
                    "required": ["urls"],
                    "properties": {
                        "urls": {
                            "type": "array",
                            "minItems": 1,
                            "items": { "type": "string" },
                            "description": "URLs to process. Duplicates are counted once.",
                        }
                    }
                },
                "MatchResult": {
                    "type": "object",
                    "required": ["matched_count", "unmatched_count", "matched_per_host", "unmatched_urls"],
                    "properties": {
                        "matched_count": {
                            "type": "integer",
                            "minimum": 0,
                            "description": "Count of distinct URLs that match a host.",
                        },
                        "unmatched_count": {
                            "type": "integer",
                            "minimum": 0,
                            "description": "Count of distinct URLs that don't match any host.",
                        },
                        "matched_per_host": {
                            "type": "array",
                            "items": { "type": "string", "example": "count=[2] example.com" },
                            "description": "One `count=[<n>] <host>` entry per host with at least one matching URL.",
                        },
                        "unmatched_urls": {
                            "type": "array",
                            "items": { "type": "string" },
                            "description": "Distinct URLs that did not match any host, as submitted.",
                        }
                    }
                },
                "SystemStatus": {
                    "type": "object",
                    "properties": {
                        "version": { "type": "string" },
                        "status": { "type": "string" },
                        "hosts_path": { "type": "string", "nullable": true },
                        "hosts_cached": { "type": "boolean" },
                    }
                }
            }
        }
    })
}

fn text_response(description: &str) -> Value {
    json!({
        "description": description,
        "content": {
            "text/plain": { "schema": { "type": "string" } }
        }
    })
}
