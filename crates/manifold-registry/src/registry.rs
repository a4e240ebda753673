// SPDX-FileCopyrightText: 2026 Manifold Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Endpoint registry: plugin authority -> handler, plugin authority ->
//! container authority, and per-group descriptor declarations.
//!
//! The registry is a plain struct; callers that share it across tasks wrap
//! it in `Arc<tokio::sync::RwLock<EndpointRegistry>>` (see
//! [`EndpointActivator`](crate::activator::EndpointActivator)). Declaration
//! and activation take `&mut self`; lookups are `&self` and safe under any
//! number of concurrent readers.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use manifold_core::error::ManifoldError;
use manifold_core::traits::{EndpointHandler, HandlerFactory};
use manifold_core::types::{
    ContainerEndpoint, EndpointDescriptor, InitializationContext, LoadContext,
};
use tracing::{debug, info};

/// Authoritative mapping for one running host process.
///
/// The container->plugin direction is one-to-many, so the authority pairs
/// are kept as an explicit ordered list: reverse resolution tries candidates
/// in declaration order, making the tie-break a documented contract rather
/// than incidental hash-map ordering.
pub struct EndpointRegistry {
    /// Plugin authority -> live handler. Populated during activation; a
    /// descriptor with several `;`-separated authorities contributes one
    /// entry per authority, all pointing at the same handler instance.
    handlers: HashMap<String, Arc<dyn EndpointHandler>>,
    /// (plugin authority, container authority) in declaration order.
    authority_pairs: Vec<(String, String)>,
    /// Group id -> declared descriptors, in declaration order.
    descriptors: HashMap<String, Vec<EndpointDescriptor>>,
}

impl EndpointRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self {
            handlers: HashMap::new(),
            authority_pairs: Vec::new(),
            descriptors: HashMap::new(),
        }
    }

    /// Record a descriptor under `group_id` and the plugin->container
    /// authority mapping.
    ///
    /// Errors with [`ManifoldError::DuplicateRegistration`] if
    /// `plugin_authority` is already known, either as a live handler entry
    /// or as a declared pair. Declaring the identical descriptor twice under
    /// one group stores it once.
    pub fn declare(
        &mut self,
        group_id: &str,
        descriptor: EndpointDescriptor,
        container: &ContainerEndpoint,
        plugin_authority: &str,
    ) -> Result<(), ManifoldError> {
        if self.handlers.contains_key(plugin_authority)
            || self
                .authority_pairs
                .iter()
                .any(|(plugin, _)| plugin == plugin_authority)
        {
            return Err(ManifoldError::DuplicateRegistration {
                authority: plugin_authority.to_string(),
            });
        }

        self.authority_pairs
            .push((plugin_authority.to_string(), container.authority.clone()));

        let group = self.descriptors.entry(group_id.to_string()).or_default();
        if !group.contains(&descriptor) {
            group.push(descriptor);
        }

        debug!(
            group = group_id,
            plugin = plugin_authority,
            container = container.authority.as_str(),
            "endpoint declared"
        );
        Ok(())
    }

    /// Instantiate and attach one handler per descriptor declared under
    /// `group_id`, in declaration order, and register a handler entry for
    /// every `;`-separated sub-authority.
    ///
    /// A descriptor whose authorities are all already registered is skipped
    /// (re-activating a group never re-instantiates handlers). Factory or
    /// attach failure is wrapped as [`ManifoldError::Activation`] and
    /// returned immediately; handlers activated earlier in the same call are
    /// kept, not rolled back.
    pub async fn activate_group(
        &mut self,
        group_id: &str,
        factory: &dyn HandlerFactory,
        host_identity: &str,
    ) -> Result<(), ManifoldError> {
        let Some(declared) = self.descriptors.get(group_id) else {
            return Ok(());
        };
        let declared = declared.clone();
        info!(
            group = group_id,
            endpoints = declared.len(),
            "activating plugin group"
        );

        let load_context = LoadContext {
            group_id: group_id.to_string(),
        };

        for descriptor in declared {
            let registered = descriptor
                .authority_list()
                .filter(|authority| self.handlers.contains_key(*authority))
                .count();
            let total = descriptor.authority_list().count();
            if total > 0 && registered == total {
                debug!(
                    group = group_id,
                    class = descriptor.class_name.as_str(),
                    "endpoint already active, skipping"
                );
                continue;
            }
            if registered > 0 {
                // Some but not all sub-authorities are taken: a foreign
                // descriptor already claimed one of them.
                let authority = descriptor
                    .authority_list()
                    .find(|authority| self.handlers.contains_key(*authority))
                    .unwrap_or_default();
                return Err(ManifoldError::DuplicateRegistration {
                    authority: authority.to_string(),
                });
            }

            let mut handler = factory
                .instantiate(&load_context, &descriptor.class_name)
                .await
                .map_err(|source| ManifoldError::Activation {
                    group: group_id.to_string(),
                    class_name: descriptor.class_name.clone(),
                    authorities: descriptor.authorities.clone(),
                    source,
                })?;

            let context = InitializationContext {
                host_identity: host_identity.to_string(),
                class_name: descriptor.class_name.clone(),
                authorities: descriptor.authorities.clone(),
                grant_permissions: descriptor.grant_permissions,
            };
            handler
                .attach(&context)
                .map_err(|source| ManifoldError::Activation {
                    group: group_id.to_string(),
                    class_name: descriptor.class_name.clone(),
                    authorities: descriptor.authorities.clone(),
                    source,
                })?;

            let handler: Arc<dyn EndpointHandler> = Arc::from(handler);
            for authority in descriptor.authority_list() {
                self.handlers
                    .insert(authority.to_string(), Arc::clone(&handler));
                debug!(
                    group = group_id,
                    authority,
                    class = descriptor.class_name.as_str(),
                    "endpoint handler registered"
                );
            }
        }

        Ok(())
    }

    /// Look up the live handler for a plugin authority.
    pub fn handler(&self, plugin_authority: &str) -> Option<Arc<dyn EndpointHandler>> {
        self.handlers.get(plugin_authority).cloned()
    }

    /// Look up the container authority a plugin authority was declared under.
    pub fn container_authority(&self, plugin_authority: &str) -> Option<&str> {
        self.authority_pairs
            .iter()
            .find(|(plugin, _)| plugin == plugin_authority)
            .map(|(_, container)| container.as_str())
    }

    /// Every plugin authority declared under `container_authority`, in
    /// declaration order. Feeds inbound reference resolution.
    pub fn plugin_authorities_for(&self, container_authority: &str) -> Vec<&str> {
        self.authority_pairs
            .iter()
            .filter(|(_, container)| container == container_authority)
            .map(|(plugin, _)| plugin.as_str())
            .collect()
    }

    /// All live handlers, deduplicated by instance. Several authorities may
    /// point at the same handler, so this can be shorter than
    /// [`handler_count`](Self::handler_count).
    pub fn all_handlers(&self) -> Vec<Arc<dyn EndpointHandler>> {
        let mut seen = HashSet::new();
        let mut handlers = Vec::new();
        for handler in self.handlers.values() {
            if seen.insert(Arc::as_ptr(handler) as *const ()) {
                handlers.push(Arc::clone(handler));
            }
        }
        handlers
    }

    /// Declared descriptors for a group, in declaration order.
    pub fn declared(&self, group_id: &str) -> &[EndpointDescriptor] {
        self.descriptors
            .get(group_id)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Number of registered authority -> handler entries.
    pub fn handler_count(&self) -> usize {
        self.handlers.len()
    }

    /// Returns true if nothing has been declared or activated.
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty() && self.authority_pairs.is_empty()
    }
}

impl Default for EndpointRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for EndpointRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EndpointRegistry")
            .field("handlers", &self.handlers.keys())
            .field("authority_pairs", &self.authority_pairs)
            .field("groups", &self.descriptors.keys())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use manifold_core::error::FactoryError;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct MockHandler {
        attached: Option<InitializationContext>,
    }

    impl EndpointHandler for MockHandler {
        fn attach(&mut self, context: &InitializationContext) -> Result<(), FactoryError> {
            self.attached = Some(context.clone());
            Ok(())
        }
    }

    /// Factory that fails for class names containing "broken" and counts
    /// instantiations.
    struct MockFactory {
        instantiations: AtomicUsize,
    }

    impl MockFactory {
        fn new() -> Self {
            Self {
                instantiations: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl HandlerFactory for MockFactory {
        async fn instantiate(
            &self,
            _context: &LoadContext,
            class_name: &str,
        ) -> Result<Box<dyn EndpointHandler>, FactoryError> {
            if class_name.contains("broken") {
                return Err(format!("no such class: {class_name}").into());
            }
            self.instantiations.fetch_add(1, Ordering::SeqCst);
            Ok(Box::new(MockHandler { attached: None }))
        }
    }

    fn container() -> ContainerEndpoint {
        ContainerEndpoint {
            class_name: "HostContainerProvider".to_string(),
            authority: "host.container".to_string(),
        }
    }

    fn descriptor(class: &str, authorities: &str) -> EndpointDescriptor {
        EndpointDescriptor {
            class_name: class.to_string(),
            authorities: authorities.to_string(),
            grant_permissions: false,
        }
    }

    #[test]
    fn declare_records_pair_and_descriptor() {
        let mut registry = EndpointRegistry::new();
        registry
            .declare("group-a", descriptor("Feed", "p.feed"), &container(), "p.feed")
            .unwrap();

        assert_eq!(registry.container_authority("p.feed"), Some("host.container"));
        assert_eq!(registry.plugin_authorities_for("host.container"), vec!["p.feed"]);
        assert_eq!(registry.declared("group-a").len(), 1);
        // Nothing activated yet.
        assert!(registry.handler("p.feed").is_none());
    }

    #[test]
    fn declaring_same_authority_twice_fails() {
        let mut registry = EndpointRegistry::new();
        registry
            .declare("group-a", descriptor("Feed", "p.feed"), &container(), "p.feed")
            .unwrap();

        let err = registry
            .declare("group-b", descriptor("Other", "p.feed"), &container(), "p.feed")
            .unwrap_err();
        assert!(matches!(
            err,
            ManifoldError::DuplicateRegistration { authority } if authority == "p.feed"
        ));
    }

    #[test]
    fn pair_order_follows_declaration_order() {
        let mut registry = EndpointRegistry::new();
        for authority in ["p.c", "p.a", "p.b"] {
            registry
                .declare(
                    "group-a",
                    descriptor(authority, authority),
                    &container(),
                    authority,
                )
                .unwrap();
        }
        assert_eq!(
            registry.plugin_authorities_for("host.container"),
            vec!["p.c", "p.a", "p.b"]
        );
    }

    #[tokio::test]
    async fn activate_group_registers_one_entry_per_sub_authority() {
        let mut registry = EndpointRegistry::new();
        registry
            .declare(
                "group-a",
                descriptor("Feed", "p.feed;p.feed.files"),
                &container(),
                "p.feed",
            )
            .unwrap();

        let factory = MockFactory::new();
        registry
            .activate_group("group-a", &factory, "com.example.host")
            .await
            .unwrap();

        assert_eq!(registry.handler_count(), 2);
        let a = registry.handler("p.feed").unwrap();
        let b = registry.handler("p.feed.files").unwrap();
        // Both sub-authorities share one handler instance.
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(registry.all_handlers().len(), 1);
    }

    #[tokio::test]
    async fn reactivating_a_group_never_reinstantiates() {
        let mut registry = EndpointRegistry::new();
        registry
            .declare("group-a", descriptor("Feed", "p.feed"), &container(), "p.feed")
            .unwrap();

        let factory = MockFactory::new();
        registry
            .activate_group("group-a", &factory, "com.example.host")
            .await
            .unwrap();
        let first = registry.handler("p.feed").unwrap();

        registry
            .activate_group("group-a", &factory, "com.example.host")
            .await
            .unwrap();
        let second = registry.handler("p.feed").unwrap();

        assert_eq!(factory.instantiations.load(Ordering::SeqCst), 1);
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[tokio::test]
    async fn failed_descriptor_keeps_earlier_activations() {
        let mut registry = EndpointRegistry::new();
        registry
            .declare("group-a", descriptor("Feed", "p.feed"), &container(), "p.feed")
            .unwrap();
        registry
            .declare(
                "group-a",
                descriptor("broken.Search", "p.search"),
                &container(),
                "p.search",
            )
            .unwrap();

        let factory = MockFactory::new();
        let err = registry
            .activate_group("group-a", &factory, "com.example.host")
            .await
            .unwrap_err();

        // The first descriptor stays activated; no rollback.
        assert!(registry.handler("p.feed").is_some());
        assert_eq!(registry.all_handlers().len(), 1);

        match err {
            ManifoldError::Activation {
                group,
                class_name,
                authorities,
                ..
            } => {
                assert_eq!(group, "group-a");
                assert_eq!(class_name, "broken.Search");
                assert_eq!(authorities, "p.search");
            }
            other => panic!("expected Activation error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn activating_unknown_group_is_a_no_op() {
        let mut registry = EndpointRegistry::new();
        let factory = MockFactory::new();
        registry
            .activate_group("nothing-declared", &factory, "com.example.host")
            .await
            .unwrap();
        assert!(registry.is_empty());
    }

    #[tokio::test]
    async fn attach_receives_descriptor_metadata() {
        struct Probe;
        impl EndpointHandler for Probe {
            fn attach(&mut self, context: &InitializationContext) -> Result<(), FactoryError> {
                assert_eq!(context.host_identity, "com.example.host");
                assert_eq!(context.class_name, "Feed");
                assert_eq!(context.authorities, "p.feed");
                assert!(context.grant_permissions);
                Ok(())
            }
        }
        struct ProbeFactory;
        #[async_trait]
        impl HandlerFactory for ProbeFactory {
            async fn instantiate(
                &self,
                context: &LoadContext,
                _class_name: &str,
            ) -> Result<Box<dyn EndpointHandler>, FactoryError> {
                assert_eq!(context.group_id, "group-a");
                Ok(Box::new(Probe))
            }
        }

        let mut registry = EndpointRegistry::new();
        registry
            .declare(
                "group-a",
                EndpointDescriptor {
                    class_name: "Feed".to_string(),
                    authorities: "p.feed".to_string(),
                    grant_permissions: true,
                },
                &container(),
                "p.feed",
            )
            .unwrap();
        registry
            .activate_group("group-a", &ProbeFactory, "com.example.host")
            .await
            .unwrap();
        assert!(registry.handler("p.feed").is_some());
    }
}
