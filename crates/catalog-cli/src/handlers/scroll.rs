use crate::cli::ScrollArgs;
use crate::context::CliContext;
use crate::output;
use catalog_core::{ListingView, PageRequest, PageSource, Phase, ViewSnapshot, VisibilitySignal};
use catalog_domain::{CatalogItem, Character, Comic, Event, ItemKind, ListingHeader};
use serde::Serialize;

#[derive(Serialize)]
struct ScrollReport<T: Serialize> {
    listing: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    header: Option<ListingHeader>,
    signals_sent: u32,
    view: ViewSnapshot<T>,
}

pub async fn handle(ctx: &CliContext, args: ScrollArgs) -> anyhow::Result<()> {
    match args.source.listing.item_kind() {
        ItemKind::Character => scroll::<Character>(ctx, args).await,
        ItemKind::Comic => scroll::<Comic>(ctx, args).await,
        ItemKind::Event => scroll::<Event>(ctx, args).await,
    }
}

async fn scroll<T: CatalogItem>(ctx: &CliContext, args: ScrollArgs) -> anyhow::Result<()> {
    let source = ctx.open_source::<T>(&args.source)?;
    let header = ctx.listing_header(&args.source).await?;
    let first_page = source
        .fetch_page(PageRequest::new(0, ctx.page_limit(args.limit)))
        .await?;

    let view = ListingView::mount(first_page, source, ctx.settings())?;
    let signal = VisibilitySignal::visible(args.ratio);

    let mut signals_sent = 0;
    let mut snapshot = view.snapshot();
    while signals_sent < args.triggers {
        view.signal(signal)?;
        signals_sent += 1;
        snapshot = view.settle().await?;
        tracing::info!(
            offset = snapshot.offset,
            items = snapshot.items.len(),
            phase = ?snapshot.phase,
            "visibility signal settled"
        );
        if matches!(snapshot.phase, Phase::Exhausted | Phase::Stalled { .. }) {
            break;
        }
    }
    view.unmount().await;

    output::output_success(ScrollReport {
        listing: args.source.listing.to_string(),
        header,
        signals_sent,
        view: snapshot,
    })
}
