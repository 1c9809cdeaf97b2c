//! End-to-end sensor tests against a mock Tian API server
//!
//! Exercises the full path: fetcher -> shared cache -> sensors -> scrolling
//! display, including the cache-sharing guarantee that each category is
//! fetched at most once per freshness window.

use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use tianxing::cache::ContentCache;
use tianxing::fetcher::TianFetcher;
use tianxing::sensor::{
    DailyWordsSensor, MorningEveningSensor, PoetrySensor, RiddleJokeSensor, ScrollingSensor,
    Sensor, SensorContext, STATE_FETCH_FAILED,
};

async fn mount(server: &MockServer, endpoint: &str, result: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path(endpoint))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "code": 200,
            "msg": "success",
            "result": result
        })))
        // One hit per category across the whole test proves cache sharing
        .expect(1)
        .mount(server)
        .await;
}

async fn mount_all(server: &MockServer) {
    mount(server, "/zaoan/index", json!({"content": "新的一天开始了"})).await;
    mount(server, "/wanan/index", json!({"content": "睡个好觉"})).await;
    mount(
        server,
        "/enmaxim/index",
        json!({"en": "Time flies.", "zh": "光阴似箭。"}),
    )
    .await;
    mount(
        server,
        "/joke/index",
        json!({"list": [{"title": "冷笑话", "content": "一个笑话。"}]}),
    )
    .await;
    mount(
        server,
        "/gjmj/index",
        json!({"content": "学而时习之。", "source": "论语"}),
    )
    .await;
    mount(server, "/duilian/index", json!({"content": "上联，下联。"})).await;
    mount(server, "/phistory/index", json!({"content": "历史上的今天。"})).await;
    mount(
        server,
        "/poetries/index",
        json!({"content": "床前明月光。", "author": "李白", "title": "静夜思"}),
    )
    .await;
    mount(
        server,
        "/zmsc/index",
        json!({"content": "明月几时有。", "author": "苏轼", "source": "水调歌头"}),
    )
    .await;
    mount(
        server,
        "/yuanqu/index",
        json!({"list": [{"content": "枯藤老树昏鸦。", "author": "马致远", "title": "天净沙·秋思"}]}),
    )
    .await;
    mount(
        server,
        "/caizimi/index",
        json!({"riddle": "谜面", "answer": "谜底", "description": "解释"}),
    )
    .await;
}

fn context(server: &MockServer) -> (SensorContext, Arc<ContentCache>) {
    let fetcher = Arc::new(TianFetcher::with_base_url(&server.uri(), "testkey").unwrap());
    let cache = Arc::new(ContentCache::new());
    let ctx = SensorContext {
        fetcher,
        cache: cache.clone(),
        ttl: Duration::from_secs(3600),
    };
    (ctx, cache)
}

#[tokio::test]
async fn test_full_update_cycle_shares_cache() {
    let server = MockServer::start().await;
    mount_all(&server).await;

    let (ctx, cache) = context(&server);

    let mut riddle_joke = RiddleJokeSensor::new(ctx.clone());
    let mut morning_evening = MorningEveningSensor::new(ctx.clone());
    let mut poetry = PoetrySensor::new(ctx.clone());
    let mut daily_words = DailyWordsSensor::new(ctx);
    let mut scrolling = ScrollingSensor::new(cache);

    riddle_joke.update().await;
    morning_evening.update().await;
    poetry.update().await;
    daily_words.update().await;

    assert!(riddle_joke.available());
    assert!(morning_evening.available());
    assert!(poetry.available());
    assert!(daily_words.available());

    let attrs = morning_evening.attributes();
    assert_eq!(attrs["morning"], "早安！新的一天开始了");
    assert_eq!(attrs["evening"], "睡个好觉晚安！");

    let attrs = daily_words.attributes();
    assert_eq!(attrs["maxim"]["content"], "Time flies.");
    assert_eq!(attrs["sentence"]["source"], "论语");

    let attrs = poetry.attributes();
    assert_eq!(attrs["tangshi"]["author"], "李白");
    assert_eq!(attrs["yuanqu"]["source"], "天净沙·秋思");

    let attrs = riddle_joke.attributes();
    assert_eq!(attrs["joke"]["name"], "冷笑话");
    assert_eq!(attrs["riddle"]["answer"], "谜底");

    // 14:00, history slot; reads only the cache, no extra requests
    scrolling.update_at(840).await;
    assert!(scrolling.available());
    assert_eq!(scrolling.state(), "🏷️简说历史");
    assert_eq!(scrolling.attributes()["content1"], "历史上的今天。");

    // A second cycle inside the freshness window must hit the cache only;
    // the .expect(1) on every mock verifies this when the server drops.
    morning_evening.update().await;
    poetry.update().await;
    daily_words.update().await;
    riddle_joke.update().await;
    assert!(morning_evening.available());
}

#[tokio::test]
async fn test_sensor_unavailable_when_category_fails() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/zaoan/index"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "code": 200,
            "result": {"content": "新的一天"}
        })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/wanan/index"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "code": 130,
            "msg": "API rate limit exceeded"
        })))
        .mount(&server)
        .await;

    let (ctx, _cache) = context(&server);
    let mut sensor = MorningEveningSensor::new(ctx);
    sensor.update().await;

    assert!(!sensor.available());
    assert_eq!(sensor.state(), STATE_FETCH_FAILED);
}

#[tokio::test]
async fn test_scrolling_follows_sibling_sensors() {
    let server = MockServer::start().await;
    mount_all(&server).await;

    let (ctx, cache) = context(&server);
    let mut scrolling = ScrollingSensor::new(cache);

    // Nothing fetched yet, the gate holds
    scrolling.update_at(1000).await;
    assert_eq!(scrolling.state(), "等待数据(1/3)");

    let mut morning_evening = MorningEveningSensor::new(ctx.clone());
    let mut poetry = PoetrySensor::new(ctx.clone());
    let mut daily_words = DailyWordsSensor::new(ctx.clone());
    let mut riddle_joke = RiddleJokeSensor::new(ctx);
    morning_evening.update().await;
    poetry.update().await;
    daily_words.update().await;
    riddle_joke.update().await;

    // 16:00, Tang poetry slot
    scrolling.update_at(960).await;
    assert!(scrolling.available());
    assert_eq!(scrolling.state(), "🔖唐诗鉴赏");
    let attrs = scrolling.attributes();
    assert_eq!(attrs["subtitle"], "李白 · 《静夜思》");
}
