use storefront::app_system::{setup_tracing, StoreConfig, StoreSystem};
use storefront::domain::{ItemId, PaymentDetails};
use storefront::error::StoreError;
use storefront::view::{render_cart, render_page, render_payment_form, render_receipt, CartView};
use tracing::{error, info, warn, Instrument};

/// Scripts one browsing session end to end and prints each rendered frame.
#[tokio::main]
async fn main() -> Result<(), StoreError> {
    let config = StoreConfig::default();
    setup_tracing(&config);

    info!("Starting storefront demo");

    let mut system = StoreSystem::with_config(config);
    let mut session = system.open_session();
    let mut view = CartView::new(session.subscribe());

    let snapshot = session.snapshot().await?;
    println!("{}", render_page(session.catalog(), &snapshot, session.state()));

    let span = tracing::info_span!("shopping", session_id = %session.session_id());
    async {
        info!("Filling the cart");
        session.select_item(ItemId(1)).await?;
        session.select_item(ItemId(1)).await?;
        session.select_item(ItemId(5)).await?;

        if let Err(e) = session.select_item(ItemId(3)).await {
            warn!(error = %e, "Add rejected");
        }

        session.increment(ItemId(5)).await?;
        session.decrement(ItemId(5)).await?;
        Ok::<_, StoreError>(())
    }
    .instrument(span)
    .await?;

    if let Some(frame) = view.poll_frame() {
        println!("{frame}");
    }

    session.open_cart()?;
    let submission = session.proceed_to_payment().await?;
    println!("{}", render_payment_form(&submission));

    // Changed their mind, then came back with one more plant.
    session.cancel_payment()?;
    session.proceed_to_payment().await?;
    session.select_item(ItemId(6)).await?;
    if let Some(preview) = session.payment_preview().await? {
        println!("{}", render_payment_form(&preview));
    }

    let details = PaymentDetails::new("1234 5678 9012 3456", "John Doe", "12/30", "123");
    match session.submit_payment(details).await {
        Ok(receipt) => {
            info!(total = %receipt.submission.total(), "Order placed");
            println!("{}", render_receipt(&receipt));
        }
        Err(e) => error!(error = %e, "Payment failed"),
    }

    println!("{}", render_cart(&session.snapshot().await?));

    drop(session);
    system.shutdown().await?;

    info!("Storefront demo completed");
    Ok(())
}
