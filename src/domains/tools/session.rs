//! Tool sessions - the long-lived owners of the tool registry.
//!
//! A [`ToolSession`] builds its registry lazily, exactly once, the first time
//! any caller needs it. Every transport reaches the same session through the
//! [`SessionDirectory`], which maps a logical name to one shared instance.

use rmcp::model::JsonObject;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;
use tokio::sync::OnceCell;
use tracing::{debug, info, instrument};

use super::definitions::{ToolContext, register_default_tools};
use super::{ToolCallResult, ToolDescriptor, ToolError, ToolRegistry};
use crate::domains::firecrawl::ContentService;

/// Name of the session shared by every caller of a deployment.
pub const SHARED_SESSION: &str = "shared-instance";

/// Singleton owner of a tool registry and the remote service handle.
pub struct ToolSession {
    name: String,
    ctx: ToolContext,
    registry: OnceCell<ToolRegistry>,
}

impl ToolSession {
    /// Create an uninitialized session. Never touches the credential.
    pub fn new(
        name: impl Into<String>,
        content: Arc<dyn ContentService>,
        remote_timeout: Duration,
    ) -> Self {
        Self {
            name: name.into(),
            ctx: ToolContext {
                content,
                remote_timeout,
            },
            registry: OnceCell::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether the registry has been built.
    pub fn is_initialized(&self) -> bool {
        self.registry.initialized()
    }

    /// Build the registry on first use and return it.
    ///
    /// Concurrent first callers wait on the same initialization; none of them
    /// sees a partially filled registry. A failed initialization leaves the
    /// session uninitialized.
    pub async fn ensure_initialized(&self) -> Result<&ToolRegistry, ToolError> {
        if let Some(registry) = self.registry.get() {
            return Ok(registry);
        }

        self.registry
            .get_or_try_init(|| async {
                info!("Initializing tools for session '{}'", self.name);
                let mut registry = ToolRegistry::new();
                register_default_tools(&mut registry, &self.ctx)?;
                info!(
                    "Tools initialization complete for session '{}' ({} tools)",
                    self.name,
                    registry.len()
                );
                Ok::<_, ToolError>(registry)
            })
            .await
    }

    /// Registered tool descriptors, initializing first if needed.
    pub async fn list_tools(&self) -> Result<Vec<ToolDescriptor>, ToolError> {
        let registry = self.ensure_initialized().await?;
        Ok(registry.descriptors().cloned().collect())
    }

    /// Invoke a tool by name, initializing first if needed.
    #[instrument(skip(self, arguments), fields(session = %self.name))]
    pub async fn invoke(
        &self,
        name: &str,
        arguments: &JsonObject,
    ) -> Result<ToolCallResult, ToolError> {
        let registry = self.ensure_initialized().await?;
        registry.invoke(name, arguments).await
    }
}

impl std::fmt::Debug for ToolSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToolSession")
            .field("name", &self.name)
            .field("initialized", &self.is_initialized())
            .finish_non_exhaustive()
    }
}

/// Lookup of sessions by logical name.
///
/// The lock only guards lookup and insertion; sessions themselves are used
/// without it.
pub struct SessionDirectory {
    content: Arc<dyn ContentService>,
    remote_timeout: Duration,
    sessions: Mutex<HashMap<String, Arc<ToolSession>>>,
}

impl SessionDirectory {
    /// Create an empty directory; sessions share `content`.
    pub fn new(content: Arc<dyn ContentService>, remote_timeout: Duration) -> Self {
        Self {
            content,
            remote_timeout,
            sessions: Mutex::new(HashMap::new()),
        }
    }

    /// Get the session called `name`, creating it on first request.
    pub fn get_or_create(&self, name: &str) -> Arc<ToolSession> {
        let mut sessions = self.sessions.lock().unwrap_or_else(PoisonError::into_inner);
        sessions
            .entry(name.to_string())
            .or_insert_with(|| {
                debug!("Creating tool session '{}'", name);
                Arc::new(ToolSession::new(
                    name,
                    self.content.clone(),
                    self.remote_timeout,
                ))
            })
            .clone()
    }

    /// The session shared by all callers.
    pub fn shared(&self) -> Arc<ToolSession> {
        self.get_or_create(SHARED_SESSION)
    }

    /// Number of sessions created so far.
    pub fn len(&self) -> usize {
        self.sessions
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
