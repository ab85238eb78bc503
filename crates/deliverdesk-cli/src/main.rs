use anyhow::Context as _;
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use deliverdesk_api::admin::{
    NewRider, OrderListParams, RiderAssignment, RiderListParams, UpdateUserRole, UserRole,
    VendorListParams, VendorVerification, VerificationAction,
};
use deliverdesk_api::health::{AppointmentParams, ProfessionalListParams};
use deliverdesk_api::wallet::{ManualAdjustment, PayoutListParams, TransactionListParams};
use deliverdesk_api::{
    AdminApi, ApiClient, ConsultationStatus, ConsultationType, HealthApi, InAppNotification,
    NotificationAudience, NotificationsApi, PayoutStatus, ProductsApi, SessionStore, WalletApi,
};
use deliverdesk_core::format::{format_currency, format_number, format_optional_date, format_percent};
use deliverdesk_core::listing::{contains_ignore_case, equals_unless_all};
use deliverdesk_core::stats::{ConsultationStats, OrderStatusCounts, TransactionTotals, VendorStats};
use deliverdesk_core::{
    aggregate_products, current_status, ledger, AggregationOptions, Config, DashboardSnapshot,
    ListQuery, LocationContext, OrderStatus, PageRequest, PayoutOverview, SortDirection,
};

mod render;

use render::{or_dash, page_footer, yes_no, Table};

/// How many rows to pull from list endpoints before filtering locally
const FETCH_LIMIT: u32 = 500;

#[derive(Parser)]
#[command(name = "deliverdesk")]
#[command(version, about = "Operator console for the DeliverDesk delivery platform", long_about = None)]
struct Cli {
    /// Backend base URL
    #[arg(long, global = true, env = "DELIVERDESK_API_URL")]
    api_url: Option<String>,

    /// Only show rows whose address mentions this city
    /// (vendors, riders, orders by pickup address, products by store address)
    #[arg(long, global = true, default_value = "all")]
    location: String,

    /// Page of results to show
    #[arg(long, global = true, default_value_t = 1)]
    page: usize,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Store a bearer token for later requests
    Login {
        #[arg(long)]
        token: String,
    },
    /// Forget the stored bearer token
    Logout,
    /// Dashboard numbers plus the latest vendors and riders
    Stats,
    /// List vendors
    Vendors {
        #[arg(long)]
        search: Option<String>,
        #[arg(long)]
        verified: Option<bool>,
        #[arg(long)]
        category: Option<String>,
        #[arg(long, value_enum, default_value_t = VendorSort::Created)]
        sort: VendorSort,
        #[arg(long)]
        asc: bool,
    },
    /// Approve or reject a vendor
    VerifyVendor {
        vendor_id: String,
        #[arg(value_enum)]
        action: Decision,
        #[arg(long)]
        reason: Option<String>,
    },
    /// Change a user's role
    SetRole { user_id: String, role: String },
    /// List riders
    Riders {
        #[arg(long)]
        search: Option<String>,
        #[arg(long)]
        available: Option<bool>,
    },
    /// Register a new rider
    CreateRider {
        #[arg(long)]
        first_name: String,
        #[arg(long)]
        last_name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        phone: String,
        #[arg(long)]
        vehicle: Option<String>,
    },
    /// Put a rider on an order
    AssignRider { order_id: String, rider_id: String },
    /// List orders with their current status
    Orders {
        /// Current status to keep (e.g. PENDING, IN_TRANSIT, all)
        #[arg(long, default_value = "all")]
        status: String,
    },
    /// Wallet transactions with credit/debit direction
    Transactions {
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        user: Option<String>,
    },
    /// Payout table and totals
    Payouts {
        #[arg(long)]
        status: Option<PayoutStatus>,
    },
    /// Credit a wallet by hand
    Fund {
        user_id: String,
        amount: f64,
        #[arg(long)]
        reason: String,
    },
    /// Debit a wallet by hand
    Debit {
        user_id: String,
        amount: f64,
        #[arg(long)]
        reason: String,
    },
    /// Supported banks
    Banks,
    /// Health professional directory
    Doctors {
        #[arg(long)]
        search: Option<String>,
        #[arg(long)]
        verified: Option<bool>,
    },
    /// Telehealth appointments
    Appointments {
        #[arg(long)]
        status: Option<ConsultationStatus>,
        #[arg(long = "type")]
        consultation_type: Option<ConsultationType>,
    },
    /// Every product across stores
    Products {
        /// Stores to walk; 0 walks all of them
        #[arg(long)]
        store_limit: Option<usize>,
        #[arg(long)]
        search: Option<String>,
    },
    /// Send an in-app notification
    Notify {
        #[arg(long)]
        title: String,
        #[arg(long)]
        body: String,
        /// all, customers, vendors, riders, doctors or users
        #[arg(long, default_value = "all")]
        audience: NotificationAudience,
        /// Target user ids (implies --audience users)
        #[arg(long = "user")]
        users: Vec<String>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Decision {
    Approve,
    Reject,
}

#[derive(Clone, Copy, ValueEnum)]
enum VendorSort {
    Name,
    Balance,
    Created,
}

struct Context {
    config: Config,
    client: ApiClient,
    location: LocationContext,
    page: PageRequest,
}

impl Context {
    fn page_of<'a, T>(&'a self) -> ListQuery<'a, T> {
        ListQuery::new().page(self.page)
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "deliverdesk=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let mut config = Config::load().context("loading config")?;
    if let Some(url) = cli.api_url {
        config.api.base_url = url;
    }

    let mut session = SessionStore::load().context("loading session")?;

    match cli.command {
        Commands::Login { token } => {
            session.set_token(&token);
            session.save()?;
            println!("Token stored.");
            Ok(())
        }
        Commands::Logout => {
            session.clear();
            session.save()?;
            println!("Session cleared.");
            Ok(())
        }
        command => {
            if session.token().is_none() {
                tracing::warn!("No token stored; requests go out unauthenticated");
            }

            let location = LocationContext::new(config.locations.clone());
            location.set_selected(&cli.location);

            let ctx = Context {
                client: config.api_client(session)?,
                page: PageRequest::new(cli.page, config.display.page_size),
                location,
                config,
            };

            run(&ctx, command).await
        }
    }
}

async fn run(ctx: &Context, command: Commands) -> anyhow::Result<()> {
    let admin = AdminApi::new(ctx.client.clone());
    let wallet = WalletApi::new(ctx.client.clone());
    let health = HealthApi::new(ctx.client.clone());
    let currency = ctx.config.display.currency.as_str();

    match command {
        Commands::Login { .. } | Commands::Logout => {
            anyhow::bail!("session commands don't talk to the backend")
        }

        Commands::Stats => {
            let snapshot = DashboardSnapshot::load(&admin, 5).await;

            match &snapshot.stats {
                Ok(stats) => {
                    println!("Users            {}", format_number(stats.total_users));
                    println!("Vendors          {}", format_number(stats.total_vendors));
                    println!("Riders           {} ({} active)", format_number(stats.total_riders), format_number(stats.active_riders));
                    println!("Orders           {}", format_number(stats.total_orders));
                    println!("Revenue          {}", format_currency(stats.total_revenue, currency));
                    println!("Awaiting review  {}", format_number(stats.pending_verifications));
                }
                Err(e) => println!("Stats unavailable: {}", e),
            }

            println!("\nLatest vendors");
            match &snapshot.vendors {
                Ok(page) => {
                    for v in &page.items {
                        println!("  {} {} ({})", v.id, v.display_name(), if v.is_verified { "verified" } else { "unverified" });
                    }
                }
                Err(e) => println!("  unavailable: {}", e),
            }

            println!("\nLatest riders");
            match &snapshot.riders {
                Ok(page) => {
                    for r in &page.items {
                        println!("  {} {} ({})", r.id, r.full_name(), if r.is_available { "available" } else { "busy" });
                    }
                }
                Err(e) => println!("  unavailable: {}", e),
            }
        }

        Commands::Vendors { search, verified, category, sort, asc } => {
            let params = VendorListParams {
                page: Some(1),
                limit: Some(FETCH_LIMIT),
                search,
                is_verified: verified,
                category: category.clone(),
            };
            let vendors = admin.vendor_list(&params).await?.items;
            let stats = VendorStats::in_location(&vendors, &ctx.location);

            let direction = if asc { SortDirection::Ascending } else { SortDirection::Descending };
            let category = category.unwrap_or_default();
            let query = ctx
                .page_of()
                .filter(|v: &deliverdesk_api::Vendor| ctx.location.matches(v.address.as_deref()))
                .filter(move |v: &deliverdesk_api::Vendor| equals_unless_all(v.category.as_deref(), &category));
            let query = match sort {
                VendorSort::Name => query.sort_by_key(|v| v.display_name().to_lowercase(), direction),
                VendorSort::Balance => query.sort_by_key(|v| v.wallet_balance, direction),
                VendorSort::Created => query.sort_by_key(|v| v.created_at, direction),
            };
            let page = query.apply(vendors);

            let mut table = Table::new(&[("ID", 12), ("Name", 28), ("Category", 12), ("Verified", 8), ("Balance", 14), ("Joined", 11)]);
            for v in &page.items {
                table.row(vec![
                    v.id.clone(),
                    v.display_name(),
                    or_dash(v.category.as_deref()),
                    yes_no(v.is_verified),
                    format_currency(v.wallet_balance, currency),
                    format_optional_date(v.created_at.as_ref()),
                ]);
            }
            table.print();
            page_footer(&page);
            println!(
                "{} of {} fetched vendors verified ({}) in {}",
                stats.verified,
                stats.total,
                format_percent(stats.verified_percent),
                ctx.location.selected_label()
            );
        }

        Commands::VerifyVendor { vendor_id, action, reason } => {
            let action = match action {
                Decision::Approve => VerificationAction::Approve,
                Decision::Reject => VerificationAction::Reject,
            };
            let verb = match action {
                VerificationAction::Approve => "approved",
                VerificationAction::Reject => "rejected",
            };
            admin
                .verify_vendor(&VendorVerification { vendor_id: vendor_id.clone(), action, reason })
                .await
                .with_context(|| format!("verifying vendor {}", vendor_id))?;
            println!("Vendor {} {}.", vendor_id, verb);
        }

        Commands::SetRole { user_id, role } => {
            let role: UserRole = role.parse().map_err(anyhow::Error::msg)?;
            admin.update_user_role(&UpdateUserRole { user_id: user_id.clone(), role }).await?;
            println!("Role of {} updated.", user_id);
        }

        Commands::Riders { search, available } => {
            let params = RiderListParams {
                page: Some(1),
                limit: Some(FETCH_LIMIT),
                search,
                is_available: available,
            };
            let riders = admin.get_all_riders(&params).await?.items;
            let page = ctx
                .page_of()
                .filter(|r: &deliverdesk_api::Rider| ctx.location.matches(r.address.as_deref()))
                .sort_by_key(|r| r.full_name().to_lowercase(), SortDirection::Ascending)
                .apply(riders);

            let mut table = Table::new(&[("ID", 12), ("Name", 24), ("Phone", 16), ("Vehicle", 10), ("Available", 9)]);
            for r in &page.items {
                table.row(vec![
                    r.id.clone(),
                    r.full_name(),
                    or_dash(r.phone_number.as_deref()),
                    or_dash(r.vehicle_type.as_deref()),
                    yes_no(r.is_available),
                ]);
            }
            table.print();
            page_footer(&page);
        }

        Commands::CreateRider { first_name, last_name, email, phone, vehicle } => {
            let rider = admin
                .create_rider(&NewRider {
                    first_name,
                    last_name,
                    email,
                    phone_number: phone,
                    vehicle_type: vehicle,
                    address: None,
                })
                .await?;
            println!("Created rider {} ({}).", rider.full_name(), rider.id);
        }

        Commands::AssignRider { order_id, rider_id } => {
            admin
                .assign_rider_to_order(&RiderAssignment { order_id: order_id.clone(), rider_id: rider_id.clone() })
                .await?;
            println!("Rider {} assigned to order {}.", rider_id, order_id);
        }

        Commands::Orders { status } => {
            let params = OrderListParams {
                page: Some(1),
                limit: Some(FETCH_LIMIT),
                status: None,
            };
            let orders = admin.get_all_orders(&params).await?.items;
            let counts = OrderStatusCounts::from_orders(&orders);
            let wanted = match status.trim() {
                s if s.eq_ignore_ascii_case("all") => None,
                s => Some(OrderStatus::parse(s)),
            };

            let page = ctx
                .page_of()
                .filter(|o: &deliverdesk_api::Order| ctx.location.matches(o.pickup_address.as_deref()))
                .filter(move |o: &deliverdesk_api::Order| {
                    wanted.as_ref().map_or(true, |w| current_status(o) == *w)
                })
                .sort_by_key(|o| o.created_at, SortDirection::Descending)
                .apply(orders);

            let mut table = Table::new(&[("ID", 12), ("Status", 16), ("Amount", 14), ("Rider", 12), ("Pickup", 32)]);
            for o in &page.items {
                table.row(vec![
                    o.id.clone(),
                    current_status(o).to_string(),
                    format_currency(o.amount, currency),
                    or_dash(o.rider_id.as_deref()),
                    or_dash(o.pickup_address.as_deref()),
                ]);
            }
            table.print();
            page_footer(&page);
            println!(
                "{} orders fetched, {} still active, {} delivered",
                counts.total,
                counts.active(),
                format_currency(counts.delivered_value, currency)
            );
        }

        Commands::Transactions { category, user } => {
            let params = TransactionListParams {
                page: Some(1),
                limit: Some(FETCH_LIMIT),
                category,
                user_id: user,
                ..Default::default()
            };
            let transactions = wallet.transactions(&params).await?.items;
            let totals = TransactionTotals::from_transactions(&transactions);
            let page = ctx
                .page_of()
                .sort_by_key(|t: &deliverdesk_api::Transaction| t.created_at, SortDirection::Descending)
                .apply(transactions);

            let mut table = Table::new(&[("ID", 12), ("Category", 22), ("Amount", 16), ("Status", 10), ("Date", 11)]);
            for t in &page.items {
                table.row(vec![
                    t.id.clone(),
                    t.category.clone(),
                    format!("{}{}", ledger::transaction_sign(t), format_currency(t.amount.abs(), currency)),
                    t.status.clone(),
                    format_optional_date(t.created_at.as_ref()),
                ]);
            }
            table.print();
            page_footer(&page);
            println!(
                "Credits {}  Debits {}  Net {}",
                format_currency(totals.credits, currency),
                format_currency(totals.debits, currency),
                format_currency(totals.net(), currency)
            );
        }

        Commands::Payouts { status } => {
            let (page, limit) = ctx.page.query_params();
            let params = PayoutListParams {
                page: Some(page),
                limit: Some(limit),
                status,
            };
            let overview = PayoutOverview::load(&wallet, &params).await?;

            let mut table = Table::new(&[("ID", 12), ("Vendor", 12), ("Amount", 14), ("Status", 10), ("Bank", 20), ("Reference", 16)]);
            for p in &overview.page.items {
                let bank = p.bank_details.as_ref().and_then(|b| b.bank_name.as_deref());
                table.row(vec![
                    p.id.clone(),
                    or_dash(p.vendor_id.as_deref()),
                    format_currency(p.amount, currency),
                    p.status.label().to_string(),
                    or_dash(bank),
                    or_dash(p.reference.as_deref()),
                ]);
            }
            table.print();
            println!(
                "\nPending {} ({})  Completed {} ({})  as of {}",
                format_currency(overview.stats.pending_total, currency),
                overview.stats.pending_count,
                format_currency(overview.stats.completed_total, currency),
                overview.stats.completed_count,
                overview.fetched_at.format("%H:%M:%S")
            );
        }

        Commands::Fund { user_id, amount, reason } => {
            let result = wallet.manual_fund(&ManualAdjustment { user_id: user_id.clone(), amount, reason }).await?;
            print_adjustment("Credited", &user_id, amount, result.map(|r| r.balance), currency);
        }

        Commands::Debit { user_id, amount, reason } => {
            let result = wallet.manual_debit(&ManualAdjustment { user_id: user_id.clone(), amount, reason }).await?;
            print_adjustment("Debited", &user_id, amount, result.map(|r| r.balance), currency);
        }

        Commands::Banks => {
            let banks = wallet.banks().await?;
            let mut table = Table::new(&[("Code", 8), ("Name", 40)]);
            for bank in banks {
                table.row(vec![bank.code, bank.name]);
            }
            table.print();
        }

        Commands::Doctors { search, verified } => {
            let params = ProfessionalListParams {
                page: Some(1),
                limit: Some(FETCH_LIMIT),
                search,
                is_verified: verified,
                ..Default::default()
            };
            let doctors = health.professionals(&params).await?.items;
            let page = ctx
                .page_of()
                .sort_by_key(|d: &deliverdesk_api::HealthProfessional| d.display_name().to_lowercase(), SortDirection::Ascending)
                .apply(doctors);

            let mut table = Table::new(&[("ID", 12), ("Name", 26), ("Specialization", 20), ("Fee", 12), ("Verified", 8)]);
            for d in &page.items {
                table.row(vec![
                    d.id.clone(),
                    d.display_name(),
                    or_dash(d.specialization.as_deref()),
                    format_currency(d.consultation_fee, currency),
                    yes_no(d.is_verified),
                ]);
            }
            table.print();
            page_footer(&page);
        }

        Commands::Appointments { status, consultation_type } => {
            let params = AppointmentParams {
                page: Some(1),
                limit: Some(FETCH_LIMIT),
                status,
                consultation_type,
                ..Default::default()
            };
            let appointments = health.appointments(&params).await?.items;
            let stats = ConsultationStats::from_consultations(&appointments);
            let page = ctx
                .page_of()
                .sort_by_key(|c: &deliverdesk_api::Consultation| c.scheduled_at.or(c.created_at), SortDirection::Descending)
                .apply(appointments);

            let mut table = Table::new(&[("ID", 12), ("Patient", 18), ("Doctor", 18), ("Type", 6), ("Status", 10), ("Fee", 12)]);
            for c in &page.items {
                let name = |p: &Option<deliverdesk_api::health::Participant>| {
                    or_dash(p.as_ref().and_then(|p| p.first_name.as_deref()))
                };
                table.row(vec![
                    c.id.clone(),
                    name(&c.patient),
                    name(&c.doctor),
                    c.consultation_type.to_string(),
                    c.status.to_string(),
                    format_currency(c.fee, currency),
                ]);
            }
            table.print();
            page_footer(&page);
            println!(
                "{} open, completed fees {}",
                stats.open(),
                format_currency(stats.completed_fees, currency)
            );
        }

        Commands::Products { store_limit, search } => {
            let products = ProductsApi::new(ctx.client.clone());
            let limit = store_limit.unwrap_or(ctx.config.catalog.store_limit);
            let report = aggregate_products(&products, AggregationOptions::from_limit(limit)).await?;

            let skipped = report.stores_skipped();
            let (stores_total, stores_scanned) = (report.stores_total, report.stores_scanned);
            let search = search.unwrap_or_default();
            let page = ctx
                .page_of()
                .filter(|p: &deliverdesk_core::CatalogProduct| ctx.location.matches(p.store.address.as_deref()))
                .filter(move |p: &deliverdesk_core::CatalogProduct| contains_ignore_case(Some(&p.product.name), &search))
                .sort_by_key(|p| p.store.name.to_lowercase(), SortDirection::Ascending)
                .apply(report.products);

            let mut table = Table::new(&[("Product", 26), ("Category", 16), ("Store", 22), ("Price", 12), ("Available", 9)]);
            for p in &page.items {
                table.row(vec![
                    p.product.name.clone(),
                    p.category_name.clone(),
                    p.store.name.clone(),
                    format_currency(p.product.price, currency),
                    yes_no(p.product.is_available),
                ]);
            }
            table.print();
            page_footer(&page);

            if skipped > 0 {
                println!("Only the first {} of {} stores were scanned.", stores_scanned, stores_total);
            }
            for failure in &report.failures {
                println!(
                    "Incomplete: {} ({}) {} failed: {}",
                    failure.store_name, failure.store_id, failure.stage, failure.reason
                );
            }
        }

        Commands::Notify { title, body, audience, users } => {
            let notifications = NotificationsApi::with_push_token_url(
                ctx.client.clone(),
                &ctx.config.api.push_token_url,
            );
            let notification = if users.is_empty() {
                InAppNotification::broadcast(&title, &body, audience)
            } else {
                InAppNotification::to_users(&title, &body, users)
            };
            let receipt = notifications.send_in_app(&notification).await?;
            match receipt {
                Some(r) => println!("Notification sent to {} recipients.", r.recipients),
                None => println!("Notification queued."),
            }
        }
    }

    Ok(())
}

fn print_adjustment(verb: &str, user_id: &str, amount: f64, balance: Option<f64>, currency: &str) {
    match balance {
        Some(balance) => println!(
            "{} {} for {}. New balance {}.",
            verb,
            format_currency(amount, currency),
            user_id,
            format_currency(balance, currency)
        ),
        None => println!("{} {} for {}.", verb, format_currency(amount, currency), user_id),
    }
}
