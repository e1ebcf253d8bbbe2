//! Fixed sample skills for checking the chatbot builder wiring.

use std::collections::BTreeMap;

use axum::Json;
use weatherbot_core::{
    SkillResponse,
    skill::{Button, ContextValue, SkillOutput, Thumbnail},
};

const TREASURE_IMAGE_URL: &str =
    "https://t1.kakaocdn.net/openbuilder/sample/lj3JUcmrzC53YIjNDkqbWK.jpg";

/// POST /simpletext
pub async fn simple_text() -> Json<SkillResponse> {
    Json(SkillResponse::simple_text("간단한 텍스트 요소입니다."))
}

/// POST /simpleimage
pub async fn simple_image() -> Json<SkillResponse> {
    Json(SkillResponse::outputs(vec![SkillOutput::SimpleImage {
        image_url: TREASURE_IMAGE_URL.to_string(),
        alt_text: "보물상자입니다".to_string(),
    }]))
}

/// POST /basiccard
pub async fn basic_card() -> Json<SkillResponse> {
    Json(SkillResponse::outputs(vec![SkillOutput::TextCard {
        title: "챗봇 관리자센터에 오신 것을 환영합니다.".to_string(),
        description: "챗봇 관리자센터로 챗봇을 제작해 보세요. \n카카오톡 채널과 연결하여, 이용자에게 챗봇 서비스를 제공할 수 있습니다.".to_string(),
        buttons: vec![
            Button::web_link(
                "소개 보러가기",
                "https://chatbot.kakao.com/docs/getting-started-overview/",
            ),
            Button::web_link("챗봇 만들러 가기", "https://chatbot.kakao.com/"),
        ],
    }]))
}

/// POST /commercecard
pub async fn commerce_card() -> Json<SkillResponse> {
    Json(SkillResponse::outputs(vec![SkillOutput::BasicCard {
        title: "보물상자".to_string(),
        description: "보물상자 안에는 뭐가 있을까".to_string(),
        thumbnail: Thumbnail {
            image_url: TREASURE_IMAGE_URL.to_string(),
        },
        buttons: vec![
            Button::message("열어보기", "짜잔! 우리가 찾던 보물입니다"),
            Button::web_link("구경하기", "https://e.kakao.com/t/hello-ryan"),
        ],
    }]))
}

/// POST /contextcontrol
pub async fn context_control() -> Json<SkillResponse> {
    let params = |pairs: &[(&str, &str)]| {
        Some(
            pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect::<BTreeMap<_, _>>(),
        )
    };

    Json(SkillResponse::context(vec![
        ContextValue {
            name: "abc".to_string(),
            life_span: 10,
            ttl: Some(60),
            params: params(&[("key1", "val1"), ("key2", "val2")]),
        },
        ContextValue {
            name: "def".to_string(),
            life_span: 5,
            ttl: None,
            params: params(&[
                ("key3", "1"),
                ("key4", "true"),
                ("key5", r#"{"jsonKey": "jsonVal"}"#),
            ]),
        },
        ContextValue {
            name: "ghi".to_string(),
            life_span: 0,
            ttl: None,
            params: None,
        },
    ]))
}
