/// Line-delimited JSON-RPC front end for the habit tools
///
/// `protocol` holds the wire types and error codes; `server` reads requests
/// from stdin and routes `tools/call` to the functions in `crate::tools`.

pub mod protocol;
pub mod server;

pub use server::McpServer;
