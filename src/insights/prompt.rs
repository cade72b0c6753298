//! Prompt templates for keyword insight generation

use crate::domain::KeywordCategory;
use crate::insights::parse::ModelInsight;
use crate::insights::{format_thousands, InsightParams, InsightRequest};

/// Persona given to the model as the system message
pub const SYSTEM_PROMPT: &str = r#"당신은 원더(Wonder) 서비스 마케팅 전략 컨설턴트입니다.

# 원더 서비스 특성
- 핸드폰으로 간편하게 보험을 설계하고, 가입하면 수수료도 내가 받을 수 있는 플랫폼
- 자격증 → 설계 → 가입 → 정산까지 원스톱 프로세스, 자격증 교육 자료 무료 제공
- 리스크와 고정비 없이 시작할 수 있는 부업, 전문 매니저의 1:1 설계·운영 지원

# 타겟 고객
- 추가 소득이 필요한 주부, 직장인
- 보험 만기일이 다가오는 40대
- 부업, N잡에 관심이 많은 타겟군

# 답변 스타일
- 보험 시즈널 특성 혹은 지출이 많아지는 시기 관점에서 분석
- 원더 서비스 특성과 연결된, 해당 시점에 실행 가능한 마케팅 액션 제시
- 구체적 숫자 기반, 키워드별 2-3문장
- 반드시 요청된 JSON 형식으로만 답변"#;

/// Category-specific analysis direction for one keyword
pub fn category_guidance(category: KeywordCategory) -> &'static str {
    match category {
        KeywordCategory::Insurance => {
            "보험 키워드입니다. 보험 가입·갱신 수요와 연결하고, 내가 직접 설계하고 수수료도 받는 원더의 구조를 강조하세요."
        }
        KeywordCategory::Sidejob => {
            "부업·지출 관련 키워드입니다. 지출이 나가는 순간 또는 추가 소득이 필요한 상황과 연결하고, 부담 없는 부업으로서의 원더를 제안하세요."
        }
        KeywordCategory::Unknown => {
            "보험이나 부업과 직접 관련이 없는 키워드입니다. 무리하게 연결하지 말고, 검색 관심이 원더 타겟 고객과 겹치는 지점이 있을 때만 제안하세요."
        }
    }
}

fn signed_percent(growth: f64) -> String {
    format!("{}{:.1}%", if growth > 0.0 { "+" } else { "" }, growth)
}

fn keyword_block(index: usize, params: &InsightParams, web_context: &str) -> String {
    let mut block = format!(
        "## {}. \"{}\" ({})\n\
         - 검색량: {}건\n\
         - 평균 대비: {}\n\
         - 전월 대비: {}%\n\
         - 최근 6개월 추이: {}\n\
         - 분석 방향: {}\n",
        index + 1,
        params.keyword,
        params.category.display_name(),
        format_thousands(params.volume),
        signed_percent(params.growth),
        params.month_over_month,
        params.trend_text,
        category_guidance(params.category),
    );

    if !web_context.trim().is_empty() {
        block.push_str(&format!("\n### 웹 검색 결과\n{}\n", web_context.trim()));
    }

    block
}

/// JSON schema of the expected answer, pretty printed
pub fn output_schema() -> String {
    let schema = schemars::schema_for!(ModelInsight);
    serde_json::to_string_pretty(&schema).unwrap_or_default()
}

/// Build the user prompt for a request
///
/// `web_context` holds one search summary per keyword, in request order;
/// missing or empty entries are left out of the prompt.
pub fn user_prompt(request: &InsightRequest, web_context: &[String]) -> String {
    let blocks: Vec<String> = request
        .params()
        .enumerate()
        .map(|(i, params)| {
            let context = web_context.get(i).map(String::as_str).unwrap_or("");
            keyword_block(i, params, context)
        })
        .collect();

    let keyword_list = request
        .params()
        .map(|p| format!("\"{}\"", p.keyword))
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        "# {}년 {}월 검색 키워드 비교 분석\n\n\
         {}\n\
         # 분석 요구사항\n\
         1. 키워드별 reason: 검색량이 왜 이렇게 변했는지, 원더와 어떻게 연결되는지 1-2문장\n\
         2. 키워드별 strategy: 원더 마케팅 액션(타겟, 메시지, 채널과 시기) 1-2문장\n\
         3. comparison: 선택한 키워드들({})의 상대적 포지션을 비교하는 2-3문장\n\n\
         # 답변 형식\n\
         keywordInsights의 keyword는 위 키워드를 그대로 사용하고, 다음 JSON 스키마를 따르는 객체 하나만 출력하세요.\n\
         {}\n",
        request.period.year(),
        request.period.month(),
        blocks.join("\n"),
        keyword_list,
        output_schema(),
    )
}
