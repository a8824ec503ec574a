//! MCP server exposing the meal catalogue and planners as tools.

mod types;

pub use types::*;

use rand::{rngs::StdRng, Rng, SeedableRng};
use rmcp::{
    handler::server::{tool::ToolRouter, wrapper::Parameters},
    model::{CallToolResult, Content, ServerInfo},
    tool, tool_handler, tool_router, ErrorData as McpError, ServerHandler, ServiceExt,
};
use serde::Serialize;
use uuid::Uuid;

use crate::db::Database;
use crate::models::*;
use crate::planning;

#[derive(Clone)]
pub struct McpServer {
    db: Database,
    tool_router: ToolRouter<Self>,
}

impl McpServer {
    pub fn new(db: Database) -> Self {
        Self {
            db,
            tool_router: Self::tool_router(),
        }
    }

    fn parse_uuid(s: &str) -> Result<Uuid, McpError> {
        Uuid::parse_str(s)
            .map_err(|e| McpError::invalid_params(format!("Invalid UUID: {}", e), None))
    }

    fn internal(e: impl std::fmt::Display) -> McpError {
        McpError::internal_error(e.to_string(), None)
    }

    fn json_result<T: Serialize>(value: &T) -> Result<CallToolResult, McpError> {
        let json = serde_json::to_string_pretty(value).map_err(Self::internal)?;
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }

    // ============================================================
    // Tool logic, shared by the tools below and by tests
    // ============================================================

    pub fn find_meals(&self, req: ListMealsRequest) -> Result<Vec<Meal>, McpError> {
        let filter = req
            .into_filter()
            .map_err(|e| McpError::invalid_params(e, None))?;
        self.db.list_meals(&filter).map_err(Self::internal)
    }

    pub fn find_meal(&self, meal_id: &str) -> Result<Meal, McpError> {
        let id = Self::parse_uuid(meal_id)?;
        self.db
            .get_meal(id)
            .map_err(Self::internal)?
            .ok_or_else(|| McpError::invalid_params("Meal not found", None))
    }

    pub fn add_meal(&self, req: CreateMealRequest) -> Result<Meal, McpError> {
        let category = req
            .category
            .parse::<MealCategory>()
            .map_err(|e| McpError::invalid_params(e.to_string(), None))?;

        self.db
            .create_meal(CreateMealInput {
                name: req.name,
                ingredients: req.ingredients,
                category,
                image_url: req.image_url,
                prep_time: req.prep_time,
                servings: req.servings,
                calories: req.calories,
                diet_type: req.diet_type,
            })
            .map_err(Self::internal)
    }

    pub fn plan_day<R: Rng + ?Sized>(
        &self,
        req: PlanRequest,
        rng: &mut R,
    ) -> Result<DayMealPlan, McpError> {
        planning::random_meals(&self.db, &req.into(), rng).map_err(Self::internal)
    }

    pub fn plan_week<R: Rng + ?Sized>(
        &self,
        req: PlanRequest,
        rng: &mut R,
    ) -> Result<WeeklyPlan, McpError> {
        planning::generate_weekly_plan(&self.db, &req.into(), rng).map_err(Self::internal)
    }

    pub fn build_shopping_list(&self, meal_ids: &[String]) -> Result<ShoppingList, McpError> {
        let ids = meal_ids
            .iter()
            .map(|id| Self::parse_uuid(id))
            .collect::<Result<Vec<_>, _>>()?;
        planning::shopping_list(&self.db, &ids).map_err(Self::internal)
    }
}

#[tool_router]
impl McpServer {
    #[tool(
        description = "List meals in the catalogue. Filter by category, name search, calorie range, diet type, and ingredients that must or must not appear. Returns at most 100 meals unless limit is given."
    )]
    async fn list_meals(
        &self,
        params: Parameters<ListMealsRequest>,
    ) -> Result<CallToolResult, McpError> {
        let meals = self.find_meals(params.0)?;
        Self::json_result(&meals)
    }

    #[tool(description = "Get one meal by its UUID, including its full ingredient text.")]
    async fn get_meal(&self, params: Parameters<GetMealRequest>) -> Result<CallToolResult, McpError> {
        let meal = self.find_meal(&params.0.meal_id)?;
        Self::json_result(&meal)
    }

    #[tool(
        description = "Add a meal to the catalogue. Write ingredients as '<quantity> [unit] item' entries separated by commas, e.g. '2 eggs, 1/2 cup milk, salt', so they aggregate well into shopping lists."
    )]
    async fn create_meal(
        &self,
        params: Parameters<CreateMealRequest>,
    ) -> Result<CallToolResult, McpError> {
        let meal = self.add_meal(params.0)?;
        Self::json_result(&meal)
    }

    #[tool(
        description = "Pick a random breakfast, lunch and dinner, optionally restricted by diet type and maximum calories. A slot is null when no meal qualifies."
    )]
    async fn random_meals(&self, params: Parameters<PlanRequest>) -> Result<CallToolResult, McpError> {
        let plan = self.plan_day(params.0, &mut StdRng::from_entropy())?;
        Self::json_result(&plan)
    }

    #[tool(
        description = "Generate a Monday to Sunday meal plan with a random breakfast, lunch and dinner each day. Meals may repeat across days."
    )]
    async fn weekly_plan(&self, params: Parameters<PlanRequest>) -> Result<CallToolResult, McpError> {
        let plan = self.plan_week(params.0, &mut StdRng::from_entropy())?;
        Self::json_result(&plan)
    }

    #[tool(
        description = "Build a shopping list for the given meals. Ingredient lines sharing the same unit and item are summed, e.g. '2 eggs' and '3 eggs' become 'eggs: 5'. Entries are sorted by name."
    )]
    async fn shopping_list(
        &self,
        params: Parameters<ShoppingListToolRequest>,
    ) -> Result<CallToolResult, McpError> {
        let list = self.build_shopping_list(&params.0.meal_ids)?;
        Self::json_result(&list)
    }
}

#[tool_handler]
impl ServerHandler for McpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            server_info: rmcp::model::Implementation {
                name: "mealgenie".into(),
                version: env!("CARGO_PKG_VERSION").into(),
                title: None,
                icons: None,
                website_url: None,
            },
            capabilities: rmcp::model::ServerCapabilities::builder()
                .enable_tools()
                .build(),
            instructions: Some(
                r#"MealGenie keeps a catalogue of meals and plans what to eat.

MEALS:
- Each meal has a category (breakfast, lunch, dinner, snack), optional calories and a diet label.
- Ingredients are free text, one entry per comma, semicolon or line: '2 eggs, 1/2 cup flour, salt'.

PLANNING:
- random_meals: one random breakfast, lunch and dinner.
- weekly_plan: the same for every day of the week.
- Both accept diet_type and max_calories to narrow the candidates.

SHOPPING:
- shopping_list sums quantities of identical '<unit> <item>' entries across meals.
- Units are not converted, and '300g chicken' is kept as one item. Write '300 g chicken' to have it summed."#
                    .into(),
            ),
            ..Default::default()
        }
    }
}

pub async fn run_stdio_server(db: Database) -> anyhow::Result<()> {
    use tokio::io::{stdin, stdout};

    tracing::info!("Starting MCP server via stdio");

    let service = McpServer::new(db);
    let server = service.serve((stdin(), stdout())).await?;

    let quit_reason = server.waiting().await?;
    tracing::info!("MCP server stopped: {:?}", quit_reason);

    Ok(())
}
