/// Generates client methods that send one action to the entity's actor and
/// unwrap the matching result variant, with automatic tracing.
///
/// ```ignore
/// impl_action_methods!(CartClient, CartAction => CartActionResult, CartError, {
///     add_item(item: Item) -> u32 => AddItem(item);
///     get_total() -> Decimal => GetTotal;
/// });
/// ```
#[macro_export]
macro_rules! impl_action_methods {
    (
        $client_name:ident, $action:ident => $result:ident, $error:ty, {
            $( $method:ident( $($param:ident: $param_type:ty),* ) -> $return_type:ty
                => $variant:ident $( ( $($arg:ident),* ) )? ; )*
        }
    ) => {
        impl $client_name {
            $(
                #[tracing::instrument(skip(self), fields(session_id = %self.session_id()))]
                pub async fn $method(&self, $($param: $param_type),*) -> Result<$return_type, $error> {
                    tracing::debug!("Sending request");
                    match self.inner.perform_action($action::$variant $( ( $($arg),* ) )?).await {
                        Ok($result::$variant(value)) => Ok(value),
                        Ok(other) => Err(<$error>::ActorCommunicationError(format!(
                            "Unexpected result: {other:?}"
                        ))),
                        Err(e) => Err(e.into()),
                    }
                }
            )*
        }
    };
}
