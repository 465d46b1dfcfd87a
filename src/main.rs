use std::{process, sync::Arc};

use rivista::{
    application::{
        admin::AdminService,
        error::AppError,
        feed::{Feed, FeedSettings, Listing},
        pagination::PageControl,
        store::{NewPost, PostPatch},
    },
    config,
    domain::posts::Post,
    infra::{store::HttpPostStore, telemetry},
    util::dates,
};
use tracing::{Dispatch, Level, dispatcher, error, info};
use tracing_subscriber::fmt as tracing_fmt;

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        report_application_error(&error);
        process::exit(1);
    }
}

fn report_application_error(error: &AppError) {
    if dispatcher::has_been_set() {
        error!(error = %error, "application error");
        return;
    }

    let subscriber = tracing_fmt().with_max_level(Level::ERROR).finish();
    let dispatch = Dispatch::new(subscriber);
    dispatcher::with_default(&dispatch, || {
        error!(error = %error, "application error");
    });
}

async fn run() -> Result<(), AppError> {
    let (cli_args, settings) = config::load_with_cli()?;

    telemetry::init(&settings.logging)?;

    let store = Arc::new(HttpPostStore::new(&settings.store.base_url)?);
    let feed_settings = FeedSettings::from(&settings.feed);

    let command = cli_args
        .command
        .unwrap_or(config::Command::Feed(config::FeedArgs::default()));

    match command {
        config::Command::Feed(args) => run_feed(store, feed_settings, args).await,
        config::Command::Home => run_home(store, feed_settings).await,
        config::Command::Article(args) => run_article(store, feed_settings, args).await,
        config::Command::Admin(args) => run_admin(store, feed_settings, args).await,
    }
}

async fn run_feed(
    store: Arc<HttpPostStore>,
    settings: FeedSettings,
    args: config::FeedArgs,
) -> Result<(), AppError> {
    let mut feed = Feed::new(store, settings);
    feed.load().await;

    if let Some(query) = args.search.as_deref() {
        feed.set_search(query);
    }
    if let Some(category) = args.category.as_deref() {
        feed.toggle_category(category);
    }
    if let Some(period) = args.archive.as_deref() {
        feed.select_archive(period);
    }
    feed.set_page(args.page);

    print_listing(&feed.listing());
    Ok(())
}

async fn run_home(store: Arc<HttpPostStore>, settings: FeedSettings) -> Result<(), AppError> {
    let mut feed = Feed::new(store, settings);
    feed.load().await;

    let home = feed.home();
    match home.lead {
        Some(lead) => {
            println!("Lead story");
            print_card(lead);
        }
        None => println!("No posts yet."),
    }

    if !home.rail.is_empty() {
        println!();
        println!("Recent");
        for post in &home.rail {
            println!("  [{}] {} | {}", post.id, post.teaser(), dates::long_date(post.date));
        }
    }

    if !home.banners.is_empty() {
        println!();
        println!("Popular");
        for banner in &home.banners {
            println!("  [{}] {}", banner.post_id, banner.title);
        }
    }

    Ok(())
}

async fn run_article(
    store: Arc<HttpPostStore>,
    settings: FeedSettings,
    args: config::ArticleArgs,
) -> Result<(), AppError> {
    let mut feed = Feed::new(store, settings);
    feed.load().await;

    let view = match feed.article(args.id).await {
        Ok(view) => view,
        Err(err) => {
            // An unknown id is a regular outcome for a reader, not a failure.
            println!("{err}");
            return Ok(());
        }
    };

    println!("{}", view.post.title);
    println!(
        "{} | {} | {} view(s)",
        view.post.category,
        dates::banner_date(view.post.date),
        view.views
    );
    println!();
    println!("{}", view.post.content);

    if !view.related.is_empty() {
        println!();
        println!("Related");
        for post in &view.related {
            println!("  [{}] {}", post.id, post.title);
        }
    }

    Ok(())
}

async fn run_admin(
    store: Arc<HttpPostStore>,
    settings: FeedSettings,
    args: config::AdminArgs,
) -> Result<(), AppError> {
    let mut admin = AdminService::new(store, settings);

    match args.command {
        config::AdminCommand::List => {
            admin.load().await;
            for post in admin.feed().snapshot() {
                println!(
                    "[{}] {} | {} | {} | {} view(s){}",
                    post.id,
                    post.title,
                    post.category,
                    dates::long_date(post.date),
                    post.views,
                    if post.popular { " | popular" } else { "" }
                );
            }
        }
        config::AdminCommand::Stats => {
            let stats = admin.stats().await?;
            println!("posts:   {}", stats.total_posts);
            println!("popular: {}", stats.popular_posts);
            println!("views:   {}", stats.total_views);
            println!("average: {:.2}", stats.avg_views);
        }
        config::AdminCommand::Create(create) => {
            let post = admin
                .create_post(NewPost {
                    title: create.title,
                    category: create.category,
                    content: create.content,
                    excerpt: create.excerpt,
                    image_url: create.image_url,
                    popular: create.popular,
                })
                .await?;
            info!(post_id = post.id, "post created");
            println!("created post {}", post.id);
        }
        config::AdminCommand::Update(update) => {
            let post = admin
                .update_post(
                    update.id,
                    PostPatch {
                        title: update.title,
                        category: update.category,
                        content: update.content,
                        excerpt: update.excerpt,
                        image_url: update.image_url,
                        popular: update.popular,
                    },
                )
                .await?;
            info!(post_id = post.id, "post updated");
            println!("updated post {}", post.id);
        }
        config::AdminCommand::Delete(delete) => {
            let post = admin.delete_post(delete.id).await?;
            info!(post_id = post.id, "post deleted");
            println!("deleted post {}", post.id);
        }
    }

    Ok(())
}

fn print_listing(listing: &Listing<'_>) {
    println!(
        "{} match(es), page {} of {}",
        listing.total_matches,
        listing.page,
        listing.total_pages.max(1)
    );

    for post in &listing.posts {
        println!();
        print_card(post);
    }

    if !listing.controls.is_empty() {
        println!();
        println!("{}", render_controls(&listing.controls));
    }

    if !listing.categories.is_empty() {
        println!();
        println!("Categories");
        for category in &listing.categories {
            println!(
                "  {}{} ({})",
                if category.active { "* " } else { "" },
                category.name,
                category.count
            );
        }
    }

    if !listing.archives.is_empty() {
        println!();
        println!("Archives");
        for bucket in &listing.archives {
            println!("  {} ({})", bucket.label, bucket.count);
        }
    }

    if !listing.popular.is_empty() {
        println!();
        println!("Popular");
        for post in &listing.popular {
            println!("  [{}] {} | {} view(s)", post.id, post.banner_title(), post.views);
        }
    }
}

fn print_card(post: &Post) {
    println!(
        "[{}] {} | {} | {}",
        post.id,
        post.title,
        post.category,
        dates::long_date(post.date)
    );
    println!("    {}", post.excerpt_text());
    println!("    image: {}", post.image_or_fallback());
}

fn render_controls(controls: &[PageControl]) -> String {
    let mut tokens = Vec::with_capacity(controls.len());
    for control in controls {
        match control {
            PageControl::Previous(_) => tokens.push("prev".to_string()),
            PageControl::Number { page, active } => {
                if *active {
                    tokens.push(format!("[{page}]"));
                } else {
                    tokens.push(page.to_string());
                }
            }
            PageControl::Ellipsis => tokens.push("...".to_string()),
            PageControl::Next(_) => tokens.push("next".to_string()),
        }
    }
    tokens.join(" ")
}
