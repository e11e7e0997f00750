//! 测试客户端 - 演示搜索 API
//!
//! 运行方式:
//! 1. 先启动服务: cargo run -p server -- serve
//! 2. 运行客户端: cargo run -p server --example search_client

use config::AppStrategy;
use rpc::{
    CatalogClient,
    search::{ContentKind, CreateFaq, CreateLink, SearchRequest},
};
use tarpc::{client, context, tokio_serde::formats::Bincode};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let strategy = config::create_strategy()?;
    let runtime_dir = strategy
        .runtime_dir()
        .unwrap_or_else(|| std::env::temp_dir().join(config::constants::APP_NAME));
    let socket_path = config::socket_path(&runtime_dir);

    println!("连接到: {:?}", socket_path);
    let transport = tarpc::serde_transport::unix::connect(&socket_path, Bincode::default).await?;
    let catalog = CatalogClient::new(client::Config::default(), transport).spawn();

    println!("\n=== ping ===");
    let response = catalog.ping(context::current()).await?;
    println!("Ping 响应: {}", response);

    println!("\n=== 写入示例数据 ===");
    let faq = catalog
        .create_faq(
            context::current(),
            CreateFaq {
                title: "Refund Policy".to_string(),
                content: "Our refund policy allows 30 days".to_string(),
                tags: vec!["billing".to_string()],
            },
        )
        .await?;
    match &faq {
        Ok(record) => println!("FAQ 已创建: #{} {}", record.id, record.title),
        Err(e) => println!("FAQ 创建失败: {:?}", e),
    }

    let link = catalog
        .create_link(
            context::current(),
            CreateLink {
                url: "https://example.com/billing".to_string(),
                title: "Billing portal".to_string(),
                description: "External billing and refund portal".to_string(),
            },
        )
        .await?;
    if let Ok(record) = &link {
        println!("链接已创建: #{} {}", record.id, record.title);
    }

    println!("\n=== 搜索 ===");
    let req = SearchRequest {
        query: "refund policy".to_string(),
        kind: None,
        limit: Some(10),
    };
    match catalog.search(context::current(), req).await? {
        Ok(response) => {
            println!(
                "查询 '{}' 命中 {} 条 (cached={})",
                response.query, response.count, response.cached
            );
            for (i, hit) in response.results.iter().enumerate() {
                println!(
                    "  [{}] {} {} (rank: {:.3})",
                    i + 1,
                    hit.kind,
                    hit.title,
                    hit.rank
                );
                println!("      {}", hit.highlighted_snippet);
            }
        }
        Err(e) => println!("搜索失败: {:?}", e),
    }

    println!("\n=== 联想 ===");
    let suggestions = catalog.suggest(context::current(), "re".to_string()).await?;
    for s in &suggestions.suggestions {
        println!("  {} ({})", s.title, s.kind);
    }

    println!("\n=== 记录列表 ===");
    if let Ok(paged) = catalog
        .list_records(context::current(), ContentKind::Faq, 1, 10)
        .await?
    {
        println!("FAQ 共 {} 条 / {} 页", paged.total, paged.total_pages);
        for summary in &paged.data {
            println!("  #{} {}", summary.id, summary.title);
        }
    }

    Ok(())
}
