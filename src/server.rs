//! MCP server exposing the laptop catalog as tools.

use crate::schema::inline_schema_for_type;
use crate::state::CatalogState;
use crate::tools::admin::{
    AdminLoginRequest, AdminRequest, CreateLaptopRequest, DeleteLaptopRequest,
    UpdateLaptopRequest, handle_admin_login, handle_catalog_stats, handle_create_laptop,
    handle_delete_laptop, handle_list_inquiries, handle_update_laptop,
};
use crate::tools::inquiry::handle_submit_inquiry;
use crate::tools::laptop::{GetLaptopRequest, handle_filter_options, handle_get_laptop};
use crate::tools::search::{SearchLaptopsRequest, handle_search_laptops};
use crate::types::NewInquiry;
use rmcp::{
    ServerHandler, ServiceExt,
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::*,
    tool, tool_handler, tool_router,
    transport::stdio,
};
use std::sync::Arc;

/// MCP server for catalog search, inquiries and back-office tools
#[derive(Clone)]
pub struct CatalogServer {
    /// Shared catalog state (store, result cache, admin auth)
    state: Arc<CatalogState>,

    /// Tool router for handling MCP tool calls
    tool_router: ToolRouter<Self>,
}

impl std::fmt::Debug for CatalogServer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CatalogServer")
            .field("state", &self.state)
            .finish()
    }
}

#[tool_router]
impl CatalogServer {
    pub fn new(state: Arc<CatalogState>) -> Self {
        Self {
            state,
            tool_router: Self::tool_router(),
        }
    }

    /// Get a reference to the shared state.
    pub fn state(&self) -> &Arc<CatalogState> {
        &self.state
    }

    #[tool(
        description = "Search the laptop catalog. Filters narrow the set (purpose, ram, storageType, storageSize, screenSize, brand, minPrice, maxPrice); matches are scored against the requested specs and ranked by relevance or price, then paginated. Presets: budget, gaming, student.",
        input_schema = inline_schema_for_type::<SearchLaptopsRequest>()
    )]
    async fn search_laptops(
        &self,
        Parameters(request): Parameters<SearchLaptopsRequest>,
    ) -> std::result::Result<String, String> {
        handle_search_laptops(&self.state, request).await
    }

    #[tool(
        description = "Show a laptop's full specifications by id, with up to four similar laptops.",
        input_schema = inline_schema_for_type::<GetLaptopRequest>()
    )]
    async fn get_laptop(
        &self,
        Parameters(request): Parameters<GetLaptopRequest>,
    ) -> std::result::Result<String, String> {
        handle_get_laptop(&self.state, request).await
    }

    #[tool(description = "List the values each search filter accepts.")]
    async fn filter_options(&self) -> std::result::Result<String, String> {
        Ok(handle_filter_options())
    }

    #[tool(
        description = "Ask to be contacted about one or more laptops. Requires name, phone, email and at least one laptop id.",
        input_schema = inline_schema_for_type::<NewInquiry>()
    )]
    async fn submit_inquiry(
        &self,
        Parameters(request): Parameters<NewInquiry>,
    ) -> std::result::Result<String, String> {
        handle_submit_inquiry(&self.state, request).await
    }

    #[tool(description = "Exchange the admin password for a token used by the admin tools.")]
    async fn admin_login(
        &self,
        Parameters(request): Parameters<AdminLoginRequest>,
    ) -> std::result::Result<String, String> {
        handle_admin_login(&self.state, request)
    }

    #[tool(description = "Admin: list buyer inquiries, newest first.")]
    async fn list_inquiries(
        &self,
        Parameters(request): Parameters<AdminRequest>,
    ) -> std::result::Result<String, String> {
        handle_list_inquiries(&self.state, request).await
    }

    #[tool(
        description = "Admin: add a laptop to the catalog.",
        input_schema = inline_schema_for_type::<CreateLaptopRequest>()
    )]
    async fn create_laptop(
        &self,
        Parameters(request): Parameters<CreateLaptopRequest>,
    ) -> std::result::Result<String, String> {
        handle_create_laptop(&self.state, request).await
    }

    #[tool(
        description = "Admin: change some fields of a laptop.",
        input_schema = inline_schema_for_type::<UpdateLaptopRequest>()
    )]
    async fn update_laptop(
        &self,
        Parameters(request): Parameters<UpdateLaptopRequest>,
    ) -> std::result::Result<String, String> {
        handle_update_laptop(&self.state, request).await
    }

    #[tool(description = "Admin: remove a laptop from the catalog.")]
    async fn delete_laptop(
        &self,
        Parameters(request): Parameters<DeleteLaptopRequest>,
    ) -> std::result::Result<String, String> {
        handle_delete_laptop(&self.state, request).await
    }

    #[tool(description = "Admin: laptop and inquiry counts, including inquiries from the last 24 hours.")]
    async fn catalog_stats(
        &self,
        Parameters(request): Parameters<AdminRequest>,
    ) -> std::result::Result<String, String> {
        handle_catalog_stats(&self.state, request).await
    }
}

#[tool_handler]
impl ServerHandler for CatalogServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo::new(ServerCapabilities::builder().enable_tools().build())
            .with_protocol_version(ProtocolVersion::V_2024_11_05)
            .with_server_info(Implementation::from_build_env())
            .with_instructions(
                "laptop-catalog-mcp: search a laptop catalog by purpose, memory, storage, \
                 screen size, brand and price. Use filter_options to see accepted values, \
                 search_laptops to find matches and get_laptop for details. Admin tools \
                 need a token from admin_login."
                    .to_string(),
            )
    }
}

/// Serve the catalog over stdio until the client disconnects.
pub async fn serve(state: Arc<CatalogState>) -> anyhow::Result<()> {
    tracing::info!("Starting laptop-catalog-mcp MCP server");

    let server = CatalogServer::new(state);
    let service = server.serve(stdio()).await.inspect_err(|e| {
        tracing::error!("Error serving MCP server: {:?}", e);
    })?;

    service.waiting().await?;
    Ok(())
}
