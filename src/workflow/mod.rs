//! Question-answering workflow for Süt Sihirbazı.
//!
//! Runs a fixed pipeline over each question: classify, then either
//! synthesize-execute-explain against the database or answer as general
//! chat. The two branches rejoin at the final answer.

mod state;

pub use state::{Classification, SessionState};

use crate::config::ConnectionConfig;
use crate::db::{self, DatabaseClient, Schema};
use crate::error::Result;
use crate::llm::{prompt, strip_sql_fences, LlmClient};
use crate::safety::StatementPolicy;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

/// Orchestrates the classify / write / execute / answer pipeline.
///
/// Holds the LLM handle, the optional database handle, and the statement
/// policy. The database handle is optional: when the farm database is
/// unreachable, every question takes the general branch.
pub struct Workflow {
    llm: Arc<dyn LlmClient>,
    db: RwLock<Option<Arc<dyn DatabaseClient>>>,
    policy: StatementPolicy,
}

impl Workflow {
    /// Creates a workflow with the given LLM, optional database, and policy.
    pub fn new(
        llm: Arc<dyn LlmClient>,
        db: Option<Arc<dyn DatabaseClient>>,
        policy: StatementPolicy,
    ) -> Self {
        Self {
            llm,
            db: RwLock::new(db),
            policy,
        }
    }

    /// Returns true if a database handle is currently attached.
    pub async fn has_database(&self) -> bool {
        self.db.read().await.is_some()
    }

    /// Attaches a database client, replacing any existing handle.
    pub async fn attach_database(&self, client: Arc<dyn DatabaseClient>) {
        *self.db.write().await = Some(client);
    }

    /// Attempts to (re)connect the database from the given configuration.
    ///
    /// On failure the existing handle is left untouched, so a transient
    /// outage does not drop a working connection.
    pub async fn connect_database(&self, config: &ConnectionConfig) -> Result<()> {
        let client = db::connect(config).await?;
        self.attach_database(client).await;
        info!("Database connected: {}", config.display_string());
        Ok(())
    }

    /// Runs the full pipeline for one question and returns the final state.
    pub async fn run(&self, question: &str) -> Result<SessionState> {
        let mut state = SessionState::new(question);

        let classification = self.classify(question).await?;
        state.classification = Some(classification);
        debug!("Question classified as {}", classification.as_str());

        match classification {
            Classification::Sql => {
                let query = self.write_query(question).await?;
                debug!(%query, "Generated SQL");
                let result = self.execute(&query).await;
                let answer = self.compose_sql_answer(question, &result).await?;

                state.query = Some(query);
                state.result = Some(result);
                state.answer = Some(answer);
            }
            Classification::General => {
                let answer = self.compose_general_answer(question).await?;
                state.answer = Some(answer);
            }
        }

        Ok(state)
    }

    /// Classifies a question as database-bound or general chat.
    ///
    /// Without a database handle every question is general: there is no
    /// schema to route against and no way to execute a query.
    pub async fn classify(&self, question: &str) -> Result<Classification> {
        let Some(db) = self.database().await else {
            return Ok(Classification::General);
        };

        let schema = db.introspect_schema().await?;
        let messages = prompt::build_router_messages(&schema, question);
        let response = self.llm.complete(&messages).await?;

        let decision = response.trim().to_uppercase();
        Ok(if decision.contains("SQL") {
            Classification::Sql
        } else {
            Classification::General
        })
    }

    /// Translates a question into a SQL query using the live schema.
    pub async fn write_query(&self, question: &str) -> Result<String> {
        let schema = self.fetch_schema().await?;
        let messages = prompt::build_query_messages(&schema, question);
        let response = self.llm.complete(&messages).await?;

        Ok(strip_sql_fences(&response))
    }

    /// Executes a query, folding every failure into the result text.
    ///
    /// This step never fails: policy rejections, missing connections, and
    /// database errors all come back as "Hata oluştu: ..." so the answer
    /// composer can explain the problem to the farmer.
    pub async fn execute(&self, sql: &str) -> String {
        if let Err(e) = self.policy.check(sql) {
            warn!("Statement rejected by policy: {}", e);
            return format!("Hata oluştu: {e}");
        }

        let Some(db) = self.database().await else {
            return "Hata oluştu: Veritabanı bağlantısı yok".to_string();
        };

        match db.execute_query(sql).await {
            Ok(result) => result.render_for_llm(),
            Err(e) => {
                warn!("Query failed: {}", e);
                format!("Hata oluştu: {e}")
            }
        }
    }

    /// Explains a query result (or error text) in natural language.
    pub async fn compose_sql_answer(&self, question: &str, result: &str) -> Result<String> {
        let messages = prompt::build_sql_answer_messages(question, result);
        self.llm.complete(&messages).await
    }

    /// Answers a general chat question in the assistant persona.
    pub async fn compose_general_answer(&self, question: &str) -> Result<String> {
        let messages = prompt::build_general_answer_messages(question);
        self.llm.complete(&messages).await
    }

    /// Returns the current database handle, if any.
    async fn database(&self) -> Option<Arc<dyn DatabaseClient>> {
        self.db.read().await.clone()
    }

    /// Fetches the schema from the attached database.
    async fn fetch_schema(&self) -> Result<Schema> {
        match self.database().await {
            Some(db) => db.introspect_schema().await,
            None => Ok(Schema::default()),
        }
    }
}
