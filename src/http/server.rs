use log::info;
use rouille::{Request, Response};
use serde::{Deserialize, Serialize};

use crate::{
    config::HttpConfig,
    domain::{
        catalog::{AlbumEntry, Catalog},
        question::{Guess, QuizQuestion},
        selection::{ALBUMS_PARAM, AlbumSelection},
    },
    http::error::ApiError,
    quiz::{
        error::QuizError,
        generator::{QuizSettings, generate_questions},
        random::RngSource,
        score::{FinalScore, Grade, final_score, progress},
    },
};

/// Stateless JSON API over the catalog and the quiz engine.
///
/// Question sequences live on the client; every call that changes or scores
/// them takes the questions in the request body.
pub struct HttpServer {
    catalog: Catalog,
    settings: QuizSettings,
    pub config: HttpConfig,
}

impl HttpServer {
    pub fn new(catalog: Catalog, settings: QuizSettings, config: HttpConfig) -> Self {
        Self {
            catalog,
            settings,
            config,
        }
    }

    pub fn run(self) {
        let addr = format!("{}:{}", self.config.bind_addr, self.config.port);
        rouille::start_server(addr, move |request| self.handle_request(request));
    }

    fn handle_request(&self, request: &Request) -> Response {
        Self::log_request(request);

        let result = rouille::router!(request,
            (GET) (/catalog) => {
                Ok(Response::json(&self.catalog))
            },
            (GET) (/albums) => {
                Ok(self.handle_albums())
            },
            (GET) (/tracks/{id: String}) => {
                self.handle_get_track(&id)
            },
            (GET) (/quiz) => {
                self.handle_generate(request)
            },
            (POST) (/guess) => {
                Self::handle_guess(request)
            },
            (POST) (/reveal) => {
                Self::handle_reveal(request)
            },
            (POST) (/score) => {
                Self::handle_score(request)
            },
            (POST) (/progress) => {
                Self::handle_progress(request)
            },
            _ => Ok(Response::empty_404())
        );

        let response = result.unwrap_or_else(ApiError::into_response);
        info!("Response: {} {}", request.method(), response.status_code);
        response
    }

    fn log_request(request: &Request) {
        info!("{} {}", request.method(), request.url());
    }

    fn handle_albums(&self) -> Response {
        let albums: Vec<AlbumSummary> = self.catalog.albums().map(AlbumSummary::from).collect();
        Response::json(&albums)
    }

    fn handle_get_track(&self, id: &str) -> Result<Response, ApiError> {
        self.catalog
            .find_track(id)
            .map(Response::json)
            .ok_or_else(|| ApiError::NotFound(format!("track {id} not found")))
    }

    fn handle_generate(&self, request: &Request) -> Result<Response, ApiError> {
        let selection = AlbumSelection::parse(request.get_param(ALBUMS_PARAM).as_deref());
        if selection.is_empty() {
            return Err(QuizError::EmptySelection.into());
        }

        let mut settings = self.settings;
        if let Some(count) = request.get_param("count") {
            settings.question_count = count
                .parse()
                .map_err(|_| ApiError::BadRequest(format!("invalid question count: {count}")))?;
        }

        let tracks = self.catalog.tracks_for_albums(selection.ids());
        let questions = generate_questions(&tracks, &settings, &mut RngSource::thread())?;
        Ok(Response::json(&questions))
    }

    fn handle_guess(request: &Request) -> Result<Response, ApiError> {
        let body: GuessRequest = rouille::input::json_input(request)?;
        body.question.validate()?;
        let guess: Guess = body.question.submit_guess(&body.track_id);
        Ok(Response::json(&guess))
    }

    fn handle_reveal(request: &Request) -> Result<Response, ApiError> {
        let question: QuizQuestion = rouille::input::json_input(request)?;
        question.validate()?;
        Ok(Response::json(&question.reveal_answer()))
    }

    fn handle_score(request: &Request) -> Result<Response, ApiError> {
        let questions = Self::questions_input(request)?;
        Ok(Response::json(&ScoreResponse::new(final_score(&questions))))
    }

    fn handle_progress(request: &Request) -> Result<Response, ApiError> {
        let index = request
            .get_param("index")
            .ok_or_else(|| ApiError::BadRequest("missing question index".into()))?;
        let index: usize = index
            .parse()
            .map_err(|_| ApiError::BadRequest(format!("invalid question index: {index}")))?;

        let questions = Self::questions_input(request)?;
        if index >= questions.len() {
            return Err(ApiError::BadRequest(format!(
                "question index {index} out of range for {} questions",
                questions.len()
            )));
        }

        Ok(Response::json(&progress(&questions, index)))
    }

    fn questions_input(request: &Request) -> Result<Vec<QuizQuestion>, ApiError> {
        let questions: Vec<QuizQuestion> = rouille::input::json_input(request)?;
        for question in &questions {
            question.validate()?;
        }
        Ok(questions)
    }
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AlbumSummary {
    artist_id: String,
    artist_name: String,
    album_id: String,
    name: String,
    jacket_url: String,
    track_count: usize,
}

impl From<AlbumEntry<'_>> for AlbumSummary {
    fn from(entry: AlbumEntry<'_>) -> Self {
        Self {
            artist_id: entry.artist.id.clone(),
            artist_name: entry.artist.name.clone(),
            album_id: entry.album.id.clone(),
            name: entry.album.name.clone(),
            jacket_url: entry.album.jacket_url.clone(),
            track_count: entry.album.tracks.len(),
        }
    }
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GuessRequest {
    question: QuizQuestion,
    track_id: String,
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ScoreResponse {
    #[serde(flatten)]
    score: FinalScore,
    grade: Grade,
    message: String,
}

impl ScoreResponse {
    fn new(score: FinalScore) -> Self {
        let grade = score.grade();
        Self {
            score,
            grade,
            message: grade.message().to_string(),
        }
    }
}

#[cfg(test)]
pub fn parse_json_response<T: serde::de::DeserializeOwned>(
    response: rouille::Response,
) -> anyhow::Result<T> {
    Ok(serde_json::from_reader(
        response.data.into_reader_and_size().0,
    )?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{catalog::tests::sample_catalog, question::GuessOutcome};
    use crate::quiz::score::{FinalScore, Progress};
    use std::io::Read;

    fn parse_text_response(response: rouille::Response) -> String {
        let mut buf = String::new();
        let mut reader = response.data.into_reader_and_size().0;
        reader
            .read_to_string(&mut buf)
            .expect("response body is not text");
        buf
    }

    fn create_server() -> HttpServer {
        HttpServer::new(
            sample_catalog(),
            QuizSettings::default(),
            HttpConfig {
                bind_addr: "0.0.0.0".to_string(),
                port: 8080,
            },
        )
    }

    fn get(url: &str) -> Request {
        Request::fake_http("GET", url, vec![], vec![])
    }

    fn post_json<T: Serialize>(url: &str, body: &T) -> anyhow::Result<Request> {
        Ok(Request::fake_http(
            "POST",
            url,
            vec![("Content-Type".to_owned(), "application/json".to_owned())],
            serde_json::to_vec(body)?,
        ))
    }

    fn generated(server: &HttpServer, url: &str) -> anyhow::Result<Vec<QuizQuestion>> {
        let response = server.handle_request(&get(url));
        assert_eq!(response.status_code, 200);
        parse_json_response(response)
    }

    // --------------------------------------------------
    // catalog
    // --------------------------------------------------

    #[test]
    fn test_http_catalog() -> anyhow::Result<()> {
        let response = create_server().handle_request(&get("/catalog"));
        assert_eq!(response.status_code, 200);

        let catalog: Catalog = parse_json_response(response)?;
        assert_eq!(catalog, sample_catalog());

        Ok(())
    }

    #[test]
    fn test_http_albums() -> anyhow::Result<()> {
        let response = create_server().handle_request(&get("/albums"));
        assert_eq!(response.status_code, 200);

        let albums: Vec<AlbumSummary> = parse_json_response(response)?;
        let ids: Vec<&str> = albums.iter().map(|a| a.album_id.as_str()).collect();
        assert_eq!(ids, ["album001", "album002", "album003"]);
        assert_eq!(albums[0].track_count, 3);
        assert_eq!(albums[2].artist_name, "Second Artist");

        Ok(())
    }

    #[test]
    fn test_http_get_track() {
        let server = create_server();
        assert_eq!(server.handle_request(&get("/tracks/track002")).status_code, 200);

        let response = server.handle_request(&get("/tracks/track999"));
        assert_eq!(response.status_code, 404);
        assert!(parse_text_response(response).contains("track999"));
    }

    #[test]
    fn test_http_unknown_route() {
        let response = create_server().handle_request(&get("/nowhere"));
        assert_eq!(response.status_code, 404);
    }

    // --------------------------------------------------
    // question generation
    // --------------------------------------------------

    #[test]
    fn test_http_generate_quiz() -> anyhow::Result<()> {
        let server = create_server();
        let questions = generated(&server, "/quiz?albums=album001,album002")?;

        assert_eq!(questions.len(), 5);
        for q in &questions {
            assert!(q.correct_answers.is_empty());
            assert!(q.tracks.iter().all(|t| t.id.as_str() <= "track005"));
        }

        Ok(())
    }

    #[test]
    fn test_http_generate_quiz_with_count() -> anyhow::Result<()> {
        let questions = generated(&create_server(), "/quiz?albums=album001&count=2")?;
        assert_eq!(questions.len(), 2);
        Ok(())
    }

    #[test]
    fn test_http_generate_without_selection() {
        let server = create_server();

        for url in ["/quiz", "/quiz?albums=", "/quiz?albums=,,"] {
            let response = server.handle_request(&get(url));
            assert_eq!(response.status_code, 400, "{url}");
            assert!(parse_text_response(response).contains("no albums selected"));
        }
    }

    #[test]
    fn test_http_generate_insufficient_tracks() {
        let response = create_server().handle_request(&get("/quiz?albums=album003"));
        assert_eq!(response.status_code, 400);
        assert!(parse_text_response(response).contains("insufficient tracks"));
    }

    #[test]
    fn test_http_generate_invalid_count() {
        let response = create_server().handle_request(&get("/quiz?albums=album001&count=many"));
        assert_eq!(response.status_code, 400);
    }

    #[test]
    fn test_http_generate_count_too_large() {
        let server = create_server();

        for count in ["101", "18446744073709551615", "99999999999999999999999"] {
            let url = format!("/quiz?albums=album001&count={count}");
            let response = server.handle_request(&get(&url));
            assert_eq!(response.status_code, 400, "{url}");
        }

        let response = server.handle_request(&get("/quiz?albums=album001&count=101"));
        assert!(parse_text_response(response).contains("exceeds the maximum"));
    }

    // --------------------------------------------------
    // answers and scoring
    // --------------------------------------------------

    #[test]
    fn test_http_guess_and_reveal() -> anyhow::Result<()> {
        let server = create_server();
        let question = generated(&server, "/quiz?albums=album001&count=1")?.remove(0);
        let track_id = question.tracks[2].id.clone();

        let request = post_json(
            "/guess",
            &GuessRequest {
                question,
                track_id: track_id.clone(),
            },
        )?;
        let response = server.handle_request(&request);
        assert_eq!(response.status_code, 200);

        let guess: Guess = parse_json_response(response)?;
        assert_eq!(guess.outcome, GuessOutcome::Correct);
        assert_eq!(guess.question.correct_answers, [track_id]);

        let response = server.handle_request(&post_json("/reveal", &guess.question)?);
        assert_eq!(response.status_code, 200);

        let revealed: QuizQuestion = parse_json_response(response)?;
        assert!(revealed.is_answer_revealed);
        assert!(revealed.is_complete());

        Ok(())
    }

    #[test]
    fn test_http_guess_rejects_bad_body() {
        let request = Request::fake_http(
            "POST",
            "/guess",
            vec![("Content-Type".to_owned(), "application/json".to_owned())],
            b"{\"trackId\": 1}".to_vec(),
        );
        let response = create_server().handle_request(&request);
        assert_eq!(response.status_code, 400);
    }

    #[test]
    fn test_http_rejects_inconsistent_questions() -> anyhow::Result<()> {
        let server = create_server();
        let mut questions = generated(&server, "/quiz?albums=album001,album002&count=2")?;
        let ids = questions[0].tracks.clone().map(|t| t.id);
        questions[0].correct_answers = vec![
            ids[0].clone(),
            ids[1].clone(),
            ids[2].clone(),
            ids[0].clone(),
        ];

        let response = server.handle_request(&post_json("/score", &questions)?);
        assert_eq!(response.status_code, 400);
        assert!(parse_text_response(response).contains("question 1"));

        let response = server.handle_request(&post_json("/progress?index=0", &questions)?);
        assert_eq!(response.status_code, 400);

        let mut question = questions.remove(0);
        question.correct_answers = vec!["track999".to_string()];
        let response = server.handle_request(&post_json("/reveal", &question)?);
        assert_eq!(response.status_code, 400);

        question.correct_answers.clear();
        question.tracks[1] = question.tracks[0].clone();
        let request = post_json(
            "/guess",
            &GuessRequest {
                track_id: question.tracks[0].id.clone(),
                question,
            },
        )?;
        assert_eq!(server.handle_request(&request).status_code, 400);

        Ok(())
    }

    #[test]
    fn test_http_score() -> anyhow::Result<()> {
        let server = create_server();
        let mut questions = generated(&server, "/quiz?albums=album001,album002&count=3")?;
        for id in questions[0].tracks.clone().map(|t| t.id) {
            questions[0] = questions[0].submit_guess(&id).question;
        }
        questions[1] = questions[1].reveal_answer();

        let response = server.handle_request(&post_json("/score", &questions)?);
        assert_eq!(response.status_code, 200);

        let body: serde_json::Value = parse_json_response(response)?;
        let score: FinalScore = serde_json::from_value(body.clone())?;
        assert_eq!(
            score,
            FinalScore {
                total_correct: 3,
                total_possible: 9,
                percentage: 33,
                perfect_questions: 1,
            }
        );
        assert_eq!(body["grade"], "keepTrying");

        Ok(())
    }

    #[test]
    fn test_http_progress() -> anyhow::Result<()> {
        let server = create_server();
        let questions = generated(&server, "/quiz?albums=album001&count=4")?;

        let response = server.handle_request(&post_json("/progress?index=3", &questions)?);
        assert_eq!(response.status_code, 200);

        let progress: Progress = parse_json_response(response)?;
        assert_eq!(progress.current_question, 4);
        assert_eq!(progress.progress_percentage, 75);
        assert!(progress.is_last_question);

        let response = server.handle_request(&post_json("/progress?index=4", &questions)?);
        assert_eq!(response.status_code, 400);

        let response = server.handle_request(&post_json("/progress", &questions)?);
        assert_eq!(response.status_code, 400);

        Ok(())
    }
}
