//! User operations against the Roster API.

use crate::cache::UserCache;
use crate::error::{ClientError, Result};
use crate::transport::ApiTransport;
use chrono::Local;
use roster_core::types::{User, UserId};
use roster_core::utils::{deep_clone, format_date, validate_email};
use serde_json::{Map, Value};
use tokio::sync::RwLock;
use tracing::{debug, info};

/// User-management service.
///
/// Owns an unbounded id-keyed cache and delegates all network traffic to
/// the injected [`ApiTransport`]. Reads populate the cache; writes
/// invalidate the affected entry unconditionally. Concurrent calls for the
/// same id may interleave so the cache is briefly stale or briefly empty;
/// no ordering is guaranteed between them.
pub struct UserService<T: ApiTransport> {
    transport: T,
    cache: RwLock<UserCache>,
}

impl<T: ApiTransport> UserService<T> {
    /// Create a service with an empty cache.
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            cache: RwLock::new(UserCache::new()),
        }
    }

    /// The transport this service delegates to.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Fetch a user by id, serving repeat lookups from the cache.
    ///
    /// A cache hit returns immediately with no transport call. On a miss,
    /// a 200 response is decoded, cached, and returned; any other status
    /// yields `Ok(None)`.
    pub async fn get_user_by_id(&self, id: &UserId) -> Result<Option<User>> {
        if let Some(user) = self.cache.read().await.get(id) {
            debug!(id = %id, "Cache hit");
            return Ok(Some(user.clone()));
        }

        let path = format!("/api/v1/users/{}", id);
        debug!(id = %id, "Fetching user");

        let response = self.transport.get(&path).await?;

        if response.status() == 200 {
            let user: User = response.json()?;
            self.cache.write().await.insert(user.clone());
            Ok(Some(user))
        } else {
            debug!(id = %id, status = response.status(), "User not found");
            Ok(None)
        }
    }

    /// Create a user from a raw field map.
    ///
    /// The `email` field (treated as empty when absent) must pass format
    /// validation or the call fails with `InvalidInput` before any request
    /// is issued. The caller's map is never mutated; a structural copy is
    /// stamped with a `created_at` date and posted. The response body is
    /// decoded without a status check, so an error body surfaces to the
    /// caller as a parse failure.
    pub async fn create_user(&self, data: &Map<String, Value>) -> Result<User> {
        let email = data.get("email").and_then(Value::as_str).unwrap_or("");
        if !validate_email(email) {
            return Err(ClientError::InvalidInput(format!(
                "Invalid email format: {:?}",
                email
            )));
        }

        let mut payload = Map::with_capacity(data.len() + 1);
        for (key, value) in data {
            payload.insert(key.clone(), deep_clone(value));
        }
        payload.insert(
            "created_at".to_string(),
            Value::String(format_date(&Local::now())),
        );

        let response = self
            .transport
            .post("/api/v1/users", &Value::Object(payload))
            .await?;

        let user: User = response.json()?;
        info!(id = %user.id, "Created user");
        Ok(user)
    }

    /// Apply a partial update to a user.
    ///
    /// The cache entry for `id` is removed as soon as the request
    /// completes, before the status is inspected. A 200 response decodes
    /// to the updated user; anything else yields `Ok(None)`.
    pub async fn update_user(
        &self,
        id: &UserId,
        updates: &Map<String, Value>,
    ) -> Result<Option<User>> {
        let path = format!("/api/v1/users/{}", id);
        debug!(id = %id, fields = updates.len(), "Updating user");

        let response = self
            .transport
            .patch(&path, &Value::Object(updates.clone()))
            .await?;

        self.cache.write().await.remove(id);

        if response.status() == 200 {
            let user: User = response.json()?;
            info!(id = %id, "Updated user");
            Ok(Some(user))
        } else {
            debug!(id = %id, status = response.status(), "Update returned non-success");
            Ok(None)
        }
    }

    /// Delete a user.
    ///
    /// The cache entry for `id` is removed regardless of the response.
    /// Returns `true` iff the server answered 204.
    pub async fn delete_user(&self, id: &UserId) -> Result<bool> {
        let path = format!("/api/v1/users/{}", id);
        debug!(id = %id, "Deleting user");

        let response = self.transport.delete(&path).await?;

        self.cache.write().await.remove(id);

        let deleted = response.status() == 204;
        if deleted {
            info!(id = %id, "Deleted user");
        }
        Ok(deleted)
    }

    /// Empty the cache. No network effect.
    pub async fn clear_cache(&self) {
        self.cache.write().await.clear();
        debug!("Cache cleared");
    }

    /// Number of currently cached users.
    pub async fn cached_len(&self) -> usize {
        self.cache.read().await.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::{ApiResponse, MockApiTransport};
    use serde_json::json;

    fn user_response(id: &str) -> ApiResponse {
        let body = serde_json::to_vec(&json!({
            "id": id,
            "email": format!("{}@example.com", id),
            "name": id,
            "created_at": "2024-01-01"
        }))
        .unwrap();
        ApiResponse::new(200, body)
    }

    #[tokio::test]
    async fn test_create_user_invalid_email_makes_no_request() {
        // No expectations registered: any transport call would panic.
        let service = UserService::new(MockApiTransport::new());

        let mut data = Map::new();
        data.insert("email".to_string(), json!("bad"));

        let result = service.create_user(&data).await;
        assert!(matches!(result, Err(ClientError::InvalidInput(_))));
    }

    #[tokio::test]
    async fn test_create_user_missing_email_treated_as_empty() {
        let service = UserService::new(MockApiTransport::new());

        let data = Map::new();
        let result = service.create_user(&data).await;
        assert!(matches!(result, Err(ClientError::InvalidInput(_))));
    }

    #[tokio::test]
    async fn test_create_user_stamps_created_at_without_mutating_input() {
        let mut transport = MockApiTransport::new();
        transport
            .expect_post()
            .withf(|path, body| {
                path == "/api/v1/users"
                    && body["email"] == "alice@example.com"
                    && body["created_at"].is_string()
            })
            .times(1)
            .returning(|_, _| Ok(user_response("user-1")));

        let service = UserService::new(transport);

        let mut data = Map::new();
        data.insert("email".to_string(), json!("alice@example.com"));
        data.insert("name".to_string(), json!("Alice"));

        let user = service.create_user(&data).await.unwrap();
        assert_eq!(user.id.as_str(), "user-1");

        // Caller's map was copied, not stamped in place.
        assert!(!data.contains_key("created_at"));
    }

    #[tokio::test]
    async fn test_get_user_served_from_cache_on_second_call() {
        let mut transport = MockApiTransport::new();
        transport
            .expect_get()
            .times(1)
            .returning(|_| Ok(user_response("user-1")));

        let service = UserService::new(transport);
        let id = UserId::new("user-1");

        let first = service.get_user_by_id(&id).await.unwrap().unwrap();
        let second = service.get_user_by_id(&id).await.unwrap().unwrap();
        assert_eq!(first, second);
        assert_eq!(service.cached_len().await, 1);
    }

    #[tokio::test]
    async fn test_get_user_non_success_is_absent_and_uncached() {
        let mut transport = MockApiTransport::new();
        transport
            .expect_get()
            .times(2)
            .returning(|_| Ok(ApiResponse::new(404, b"Not found".to_vec())));

        let service = UserService::new(transport);
        let id = UserId::new("missing");

        // Absent results are not cached, so both calls hit the transport.
        assert!(service.get_user_by_id(&id).await.unwrap().is_none());
        assert!(service.get_user_by_id(&id).await.unwrap().is_none());
        assert_eq!(service.cached_len().await, 0);
    }

    #[tokio::test]
    async fn test_update_invalidates_cache_even_on_failure_status() {
        let mut transport = MockApiTransport::new();
        // First and third calls fetch over the network; the update between
        // them must have dropped the cached entry despite the 500.
        transport
            .expect_get()
            .times(2)
            .returning(|_| Ok(user_response("user-1")));
        transport
            .expect_patch()
            .times(1)
            .returning(|_, _| Ok(ApiResponse::new(500, b"boom".to_vec())));

        let service = UserService::new(transport);
        let id = UserId::new("user-1");

        service.get_user_by_id(&id).await.unwrap();
        assert_eq!(service.cached_len().await, 1);

        let updated = service.update_user(&id, &Map::new()).await.unwrap();
        assert!(updated.is_none());
        assert_eq!(service.cached_len().await, 0);

        service.get_user_by_id(&id).await.unwrap();
    }

    #[tokio::test]
    async fn test_delete_invalidates_cache_and_reports_status() {
        let mut transport = MockApiTransport::new();
        transport
            .expect_get()
            .times(1)
            .returning(|_| Ok(user_response("user-1")));
        transport
            .expect_delete()
            .times(1)
            .returning(|_| Ok(ApiResponse::new(204, Vec::new())));

        let service = UserService::new(transport);
        let id = UserId::new("user-1");

        service.get_user_by_id(&id).await.unwrap();
        assert_eq!(service.cached_len().await, 1);

        assert!(service.delete_user(&id).await.unwrap());
        assert_eq!(service.cached_len().await, 0);
    }

    #[tokio::test]
    async fn test_delete_non_204_returns_false() {
        let mut transport = MockApiTransport::new();
        transport
            .expect_delete()
            .times(1)
            .returning(|_| Ok(ApiResponse::new(404, b"Not found".to_vec())));

        let service = UserService::new(transport);
        assert!(!service.delete_user(&UserId::new("missing")).await.unwrap());
    }

    #[tokio::test]
    async fn test_clear_cache() {
        let mut transport = MockApiTransport::new();
        transport
            .expect_get()
            .times(2)
            .returning(|_| Ok(user_response("user-1")));

        let service = UserService::new(transport);
        let id = UserId::new("user-1");

        service.get_user_by_id(&id).await.unwrap();
        service.clear_cache().await;
        assert_eq!(service.cached_len().await, 0);

        // Next lookup goes back to the transport.
        service.get_user_by_id(&id).await.unwrap();
    }
}
