/// `new` constructor around a [`ResourceClient`](crate::actor_framework::ResourceClient).
macro_rules! impl_client_new {
    ($client_name:ident, $resource:ty) => {
        impl $client_name {
            pub fn new(inner: $crate::actor_framework::ResourceClient<$resource>) -> Self {
                Self { inner }
            }
        }
    };
}

/// Read side: `list_<collection>`.
macro_rules! impl_list_method {
    ($client_name:ident, $resource:ty, $collection_snake:ident) => {
        paste::paste! {
            impl $client_name {
                #[tracing::instrument(skip(self))]
                pub async fn [<list_ $collection_snake>](&self) -> Result<Vec<$resource>, $crate::app_system::ResourceError> {
                    tracing::debug!("Sending request");
                    self.inner.list().await
                }
            }
        }
    };
}

/// Write side: `create_<entry>` and `delete_<entry>`.
macro_rules! impl_mutation_methods {
    ($client_name:ident, $resource:ty, $entry_snake:ident) => {
        paste::paste! {
            impl $client_name {
                #[tracing::instrument(skip(self, payload), fields(parent_id = ?payload.parent_id))]
                pub async fn [<create_ $entry_snake>](
                    &self,
                    payload: <$resource as $crate::actor_framework::Resource>::CreatePayload,
                ) -> Result<$resource, $crate::app_system::ResourceError> {
                    tracing::debug!("Sending request");
                    self.inner.create(payload).await
                }

                #[tracing::instrument(skip(self), fields(entry_id = %id))]
                pub async fn [<delete_ $entry_snake>](
                    &self,
                    id: $crate::domain::EntityId,
                ) -> Result<(), $crate::app_system::ResourceError> {
                    tracing::debug!("Sending request");
                    self.inner.delete(id).await
                }
            }
        }
    };
}

/// Full client: constructor, list, create and delete.
macro_rules! impl_basic_client {
    ($client_name:ident, $resource:ty, $collection_snake:ident, $entry_snake:ident) => {
        impl_client_new!($client_name, $resource);
        impl_list_method!($client_name, $resource, $collection_snake);
        impl_mutation_methods!($client_name, $resource, $entry_snake);
    };
}
