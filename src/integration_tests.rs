#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use crate::actor_framework::ResourceActor;
    use crate::app_system::{StoreConfig, StoreSystem};
    use crate::cart_actor::CartError;
    use crate::checkout::{CheckoutError, CheckoutEvent, CheckoutState};
    use crate::clients::CartClient;
    use crate::domain::{Cart, Catalog, ItemId, PaymentDetails, SessionId, PAYMENT_SUCCESS_MESSAGE};
    use crate::error::StoreError;
    use crate::view::CartView;

    fn card() -> PaymentDetails {
        PaymentDetails::new("1234 5678 9012 3456", "John Doe", "12/30", "123")
    }

    #[tokio::test]
    async fn test_walkthrough_scenario() -> Result<(), Box<dyn std::error::Error>> {
        let mut system = StoreSystem::new();
        let mut session = system.open_session();

        session.select_item(ItemId(1)).await?;
        session.select_item(ItemId(1)).await?;
        let snapshot = session.snapshot().await?;
        assert_eq!(snapshot.line_count(), 1);
        assert_eq!(snapshot.quantity_of(ItemId(1)), Some(2));
        assert_eq!(session.total().await?, Decimal::new(4998, 2));

        let rejected = session.select_item(ItemId(3)).await;
        assert_eq!(rejected, Err(StoreError::Cart(CartError::ItemUnavailable(ItemId(3)))));
        assert_eq!(session.snapshot().await?, snapshot);

        session.set_quantity(ItemId(1), 0).await?;
        assert!(session.snapshot().await?.is_empty());
        assert_eq!(session.total().await?, Decimal::ZERO);

        system.shutdown().await?;
        Ok(())
    }

    #[tokio::test]
    async fn test_completed_checkout_clears_cart_and_returns_to_browsing() -> Result<(), Box<dyn std::error::Error>> {
        let mut system = StoreSystem::new();
        let mut session = system.open_session();

        for id in [1, 2, 2, 6] {
            session.select_item(ItemId(id)).await?;
        }
        session.open_cart()?;
        let submission = session.proceed_to_payment().await?;
        assert_eq!(session.state(), CheckoutState::PaymentEntry);
        assert_eq!(submission.total(), Decimal::new(8396, 2));
        assert_eq!(session.payment_preview().await?, Some(submission.clone()));

        let receipt = session.submit_payment(card()).await?;
        assert_eq!(receipt.message, PAYMENT_SUCCESS_MESSAGE);
        assert_eq!(receipt.submission, submission);
        assert_eq!(session.state(), CheckoutState::Browsing);
        assert!(session.snapshot().await?.is_empty());
        assert_eq!(session.payment_preview().await?, None);

        system.shutdown().await?;
        Ok(())
    }

    #[tokio::test]
    async fn test_cancel_payment_keeps_cart() -> Result<(), Box<dyn std::error::Error>> {
        let mut system = StoreSystem::new();
        let mut session = system.open_session();

        session.select_item(ItemId(4)).await?;
        let before = session.snapshot().await?;
        session.open_cart()?;
        session.proceed_to_payment().await?;

        assert_eq!(session.cancel_payment()?, CheckoutState::Cancelled);
        assert_eq!(session.state(), CheckoutState::CartReview);
        assert_eq!(session.snapshot().await?, before);

        system.shutdown().await?;
        Ok(())
    }

    #[tokio::test]
    async fn test_empty_cart_cannot_proceed_to_payment() -> Result<(), Box<dyn std::error::Error>> {
        let mut system = StoreSystem::new();
        let mut session = system.open_session();

        session.open_cart()?;
        let result = session.proceed_to_payment().await;
        assert_eq!(result, Err(StoreError::Checkout(CheckoutError::EmptyCart)));
        assert_eq!(session.state(), CheckoutState::CartReview);

        system.shutdown().await?;
        Ok(())
    }

    #[tokio::test]
    async fn test_payment_outside_payment_entry_leaves_cart_alone() -> Result<(), Box<dyn std::error::Error>> {
        let mut system = StoreSystem::new();
        let mut session = system.open_session();

        session.select_item(ItemId(2)).await?;
        let result = session.submit_payment(card()).await;
        assert_eq!(
            result,
            Err(StoreError::Checkout(CheckoutError::InvalidTransition {
                state: CheckoutState::Browsing,
                event: CheckoutEvent::SubmitPayment,
            }))
        );
        assert_eq!(session.snapshot().await?.quantity_of(ItemId(2)), Some(1));

        system.shutdown().await?;
        Ok(())
    }

    #[tokio::test]
    async fn test_quantity_controls() -> Result<(), Box<dyn std::error::Error>> {
        let mut system = StoreSystem::new();
        let mut session = system.open_session();

        session.select_item(ItemId(5)).await?;
        assert_eq!(session.increment(ItemId(5)).await?, Some(2));
        assert_eq!(session.decrement(ItemId(5)).await?, Some(1));
        assert_eq!(session.decrement(ItemId(5)).await?, Some(0));
        assert!(session.snapshot().await?.is_empty());
        assert_eq!(session.decrement(ItemId(5)).await?, None);

        session.select_item(ItemId(5)).await?;
        assert!(session.set_quantity_input(ItemId(5), "4").await?);
        assert_eq!(session.total().await?, Decimal::new(6396, 2));

        let before = session.snapshot().await?;
        assert!(matches!(
            session.set_quantity(ItemId(5), -1).await,
            Err(StoreError::Cart(CartError::InvalidQuantity(_)))
        ));
        assert!(matches!(
            session.set_quantity_input(ItemId(5), "2.5").await,
            Err(StoreError::Cart(CartError::InvalidQuantity(_)))
        ));
        assert_eq!(session.snapshot().await?, before);

        assert!(!session.remove_line(ItemId(1)).await?);
        assert_eq!(session.snapshot().await?, before);

        system.shutdown().await?;
        Ok(())
    }

    fn spawn_cart(session: &str) -> CartClient {
        let (actor, client) = ResourceActor::new(16, Cart::new(SessionId::new(session)));
        tokio::spawn(actor.run());
        CartClient::new(client)
    }

    #[tokio::test]
    async fn test_concurrent_increments_are_not_lost() -> Result<(), Box<dyn std::error::Error>> {
        let catalog = Catalog::plants();
        let cart = spawn_cart("session_race");
        let other = cart.clone();
        cart.add_item(catalog.get(ItemId(1)).unwrap().clone()).await?;

        let (first, second) = tokio::join!(cart.increment(ItemId(1)), other.increment(ItemId(1)));
        let mut seen = [first?, second?];
        seen.sort();
        assert_eq!(seen, [Some(2), Some(3)]);
        assert_eq!(cart.snapshot().await?.quantity_of(ItemId(1)), Some(3));

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let client = cart.clone();
                tokio::spawn(async move { client.increment(ItemId(1)).await })
            })
            .collect();
        for handle in handles {
            handle.await??;
        }
        assert_eq!(cart.snapshot().await?.quantity_of(ItemId(1)), Some(11));

        cart.shutdown().await?;
        Ok(())
    }

    #[tokio::test]
    async fn test_decrement_racing_a_quantity_update_is_serialized() -> Result<(), Box<dyn std::error::Error>> {
        let catalog = Catalog::plants();
        let cart = spawn_cart("session_race");
        let other = cart.clone();
        cart.add_item(catalog.get(ItemId(2)).unwrap().clone()).await?;
        cart.update_quantity(ItemId(2), 2).await?;

        let (decremented, updated) = tokio::join!(cart.decrement(ItemId(2)), other.update_quantity(ItemId(2), 5));
        assert!(updated?);
        let final_quantity = cart.snapshot().await?.quantity_of(ItemId(2));
        match decremented? {
            // Decrement ran first, the update overwrote it.
            Some(1) => assert_eq!(final_quantity, Some(5)),
            // Update ran first, the decrement applied on top of it.
            Some(4) => assert_eq!(final_quantity, Some(4)),
            other => panic!("Unexpected decrement outcome: {other:?}"),
        }

        cart.shutdown().await?;
        Ok(())
    }

    #[tokio::test]
    async fn test_unknown_item_is_rejected() -> Result<(), Box<dyn std::error::Error>> {
        let mut system = StoreSystem::new();
        let mut session = system.open_session();

        let result = session.select_item(ItemId(99)).await;
        assert_eq!(result, Err(StoreError::Cart(CartError::UnknownItem(ItemId(99)))));

        system.shutdown().await?;
        Ok(())
    }

    #[tokio::test]
    async fn test_view_receives_one_frame_per_mutation() -> Result<(), Box<dyn std::error::Error>> {
        let mut system = StoreSystem::new();
        let mut session = system.open_session();
        let mut view = CartView::new(session.subscribe());

        assert!(view.poll_frame().is_none());

        session.select_item(ItemId(1)).await?;
        let frame = view.next_frame().await.expect("cart actor alive");
        assert!(frame.contains("Total: $24.99"));

        // Rejected and no-op actions publish nothing.
        let _ = session.select_item(ItemId(3)).await;
        session.remove_line(ItemId(6)).await?;
        assert!(view.poll_frame().is_none());

        session.open_cart()?;
        session.proceed_to_payment().await?;
        session.submit_payment(card()).await?;
        let frame = view.poll_frame().expect("cleared cart published");
        assert!(frame.contains("Your cart is empty"));
        assert!(view.poll_frame().is_none());

        system.shutdown().await?;
        Ok(())
    }

    #[tokio::test]
    async fn test_sessions_have_independent_carts() -> Result<(), Box<dyn std::error::Error>> {
        let mut system = StoreSystem::with_config(StoreConfig {
            cart_buffer_size: 4,
            ..StoreConfig::default()
        });
        let mut alice = system.open_session();
        let bob = system.open_session();
        assert_ne!(alice.session_id(), bob.session_id());
        assert_eq!(system.session_count(), 2);

        alice.select_item(ItemId(2)).await?;
        assert_eq!(alice.snapshot().await?.line_count(), 1);
        assert!(bob.snapshot().await?.is_empty());

        bob.close().await?;
        system.shutdown().await?;
        Ok(())
    }

    #[tokio::test]
    async fn test_dropped_and_closed_sessions_stop_their_carts() -> Result<(), Box<dyn std::error::Error>> {
        let mut system = StoreSystem::new();
        let mut dropped = system.open_session();
        let closed = system.open_session();
        assert_eq!(system.session_count(), 2);

        dropped.select_item(ItemId(1)).await?;
        let mut dropped_feed = dropped.subscribe();
        let mut closed_feed = closed.subscribe();

        drop(dropped);
        closed.close().await?;
        assert_eq!(system.session_count(), 0);

        // Publishers are gone once the actors have stopped.
        assert!(dropped_feed.changed().await.is_err());
        assert!(closed_feed.changed().await.is_err());

        let kept = system.open_session();
        assert_eq!(system.session_count(), 1);
        assert_eq!(kept.session_id(), &SessionId::new("session_3"));

        system.shutdown().await?;
        Ok(())
    }

    #[tokio::test]
    async fn test_payment_preview_tracks_cart_edits() -> Result<(), Box<dyn std::error::Error>> {
        let mut system = StoreSystem::new();
        let mut session = system.open_session();

        assert_eq!(session.payment_preview().await?, None);

        session.select_item(ItemId(1)).await?;
        session.open_cart()?;
        let submission = session.proceed_to_payment().await?;
        assert_eq!(submission.total(), Decimal::new(2499, 2));

        // Cart edits are accepted on the payment screen.
        session.select_item(ItemId(6)).await?;
        let preview = session.payment_preview().await?.expect("in payment entry");
        assert_eq!(preview.total(), session.total().await?);
        assert_eq!(preview.total(), Decimal::new(4398, 2));

        let receipt = session.submit_payment(card()).await?;
        assert_eq!(receipt.submission.total(), preview.total());
        assert_eq!(receipt.submission, preview);

        system.shutdown().await?;
        Ok(())
    }
}
