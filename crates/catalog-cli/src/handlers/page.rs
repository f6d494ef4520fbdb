use crate::cli::PageArgs;
use crate::context::CliContext;
use crate::output;
use catalog_core::{Page, PageRequest, PageSource};
use catalog_domain::{CatalogItem, Character, Comic, Event, ItemKind, ListingHeader};
use serde::Serialize;

#[derive(Serialize)]
struct PageReport<T: Serialize> {
    #[serde(skip_serializing_if = "Option::is_none")]
    header: Option<ListingHeader>,
    #[serde(flatten)]
    page: Page<T>,
}

pub async fn handle(ctx: &CliContext, args: PageArgs) -> anyhow::Result<()> {
    match args.source.listing.item_kind() {
        ItemKind::Character => fetch::<Character>(ctx, args).await,
        ItemKind::Comic => fetch::<Comic>(ctx, args).await,
        ItemKind::Event => fetch::<Event>(ctx, args).await,
    }
}

async fn fetch<T: CatalogItem>(ctx: &CliContext, args: PageArgs) -> anyhow::Result<()> {
    let source = ctx.open_source::<T>(&args.source)?;
    let request = PageRequest::new(args.offset, ctx.page_limit(args.limit));
    let page = source.fetch_page(request).await?;
    let header = ctx.listing_header(&args.source).await?;
    output::output_success(PageReport { header, page })
}
