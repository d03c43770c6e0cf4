//! Charge and refund commands.

use anyhow::{Context, Result};
use clap::Args;

use opsdesk_core::Feedback;
use opsdesk_core::resources::{ChargeRequest, RefundRequest};

use crate::commands::report;
use crate::output;
use crate::session::App;

#[derive(Args, Debug)]
pub struct ChargeArgs {
    /// Player uid
    #[arg(long)]
    pub uid: i64,

    /// Package to charge
    #[arg(long)]
    pub package: i64,
}

pub async fn charge(args: ChargeArgs, app: &App) -> Result<()> {
    let order = app
        .client
        .recharge_charge(&ChargeRequest {
            uid: args.uid,
            package_id: args.package,
        })
        .await
        .context("Failed to charge")?;

    if app.json {
        return output::json(&order);
    }

    output::success(&format!("Charged order {}", order.order_id));
    output::field("Id", &order.id.to_string());
    output::field("Amount", &order.pay_amount.to_string());
    Ok(())
}

#[derive(Args, Debug)]
pub struct RefundArgs {
    /// Numeric id of the order
    pub order: i64,

    /// Why the order is refunded
    #[arg(long)]
    pub reason: String,
}

pub async fn refund(args: RefundArgs, app: &App) -> Result<()> {
    let request = RefundRequest {
        order_id: args.order,
        reason: args.reason,
    };
    if let Err(errors) = request.validate() {
        return Err(report(Feedback::Inline(errors)));
    }

    let application = app
        .client
        .request_refund(&request)
        .await
        .context("Failed to request refund")?;

    if app.json {
        return output::json(&application);
    }

    output::success(&format!("Refund application {} filed", application.id));
    output::field("Status", &format!("{:?}", application.status).to_lowercase());
    Ok(())
}
