//! Session and booking commands.

use campusnest_store::{
    AuthStore, BookingStore, CardDetails, LeaseDuration, PaymentMethod, PaymentStore,
    PropertyStore, ReceiptView,
};
use clap::Args;

use crate::{check, Context};

#[derive(Debug, Args)]
pub struct BookArgs {
    /// Listing to book
    pub property_id: String,
    /// Lease length in months
    #[arg(long, default_value_t = 1)]
    pub months: u32,
    /// card, mobile-money or bank-transfer
    #[arg(long, default_value = "card")]
    pub method: PaymentMethod,
    #[arg(long)]
    pub card_name: Option<String>,
    #[arg(long)]
    pub card_number: Option<String>,
    /// MM/YY
    #[arg(long)]
    pub expiry: Option<String>,
    #[arg(long)]
    pub cvv: Option<String>,
}

impl BookArgs {
    fn card(&self) -> Option<CardDetails> {
        Some(CardDetails {
            holder_name: self.card_name.clone()?,
            number: self.card_number.clone()?,
            expiry: self.expiry.clone()?,
            cvv: self.cvv.clone()?,
        })
    }
}

pub(crate) async fn run_login(ctx: &Context, email: &str, password: &str) -> anyhow::Result<()> {
    let auth = AuthStore::load(ctx.api.clone(), ctx.storage.clone());
    if !auth.login(email, password).await {
        check(auth.snapshot().status.error, "login failed")?;
    }
    if let Some(session) = auth.snapshot().session {
        println!("signed in as {}", session.user.name);
    }
    Ok(())
}

pub(crate) fn run_logout(ctx: &Context) {
    let auth = AuthStore::load(ctx.api.clone(), ctx.storage.clone());
    auth.logout();
    println!("signed out");
}

/// Runs the simulated payment flow end to end and prints the receipt.
pub(crate) async fn run_book(ctx: &Context, args: BookArgs) -> anyhow::Result<()> {
    let properties = PropertyStore::new(ctx.api.clone());
    properties.fetch_one(&args.property_id).await;
    let state = properties.snapshot();
    check(state.status.error, "failed to load listing")?;
    let Some(property) = state.selected else {
        anyhow::bail!("listing {} not found", args.property_id);
    };
    if !property.is_available() {
        anyhow::bail!("listing {} is {}", property.id, property.status);
    }

    let mut payment = PaymentStore::new();
    payment.select_property(property);
    payment.set_duration(LeaseDuration::new(args.months)?);
    payment.set_method(args.method);
    if let Some(card) = args.card() {
        payment.set_card(card);
    }

    if let Some(quote) = payment.amount() {
        println!("monthly:     {}", quote.monthly_price);
        println!("months:      {}", quote.months);
        println!("subtotal:    {}", quote.subtotal);
        println!("service fee: {}", quote.service_fee);
        println!("total:       {}", quote.total);
    }

    let receipt = payment.submit()?;
    let mut bookings = BookingStore::new();
    let booking = bookings.confirm(receipt);

    match payment.receipt_view() {
        ReceiptView::Show(receipt) => {
            println!();
            println!("transaction: {}", receipt.transaction_id);
            println!("booking:     {}", booking.id);
            println!("listing:     {}", receipt.property_title);
            println!("duration:    {}", receipt.duration_label);
            println!("method:      {}", receipt.method);
            if let Some(last4) = &receipt.card_last4 {
                println!("card:        **** {last4}");
            }
            println!("paid:        {} at {}", receipt.quote.total, receipt.paid_at.to_rfc3339());
        }
        ReceiptView::RedirectHome => println!("no transaction recorded"),
    }
    Ok(())
}
