pub mod errors;
pub mod models;
pub mod providers;
pub mod services;
pub mod sources;

use chrono::Utc;
use models::{
    badge::Badge,
    content::CourseContent,
    ledger::PortfolioSnapshot,
    lesson::{DifficultyFilter, Lesson, LessonStats},
    notification::{Notification, NotificationCenter, Severity},
    profile::{ActivityItem, ActivityKind},
    quiz::{AnswerFeedback, Question, QuizResult},
    quote::{QuoteBoard, StockQuote},
    settings::{PortfolioMode, Settings},
    trade::{TradeAction, TradeForm, TradeOrder, TradeOutcome},
};
use providers::traits::QuoteProvider;
use services::{
    catalog_service,
    dashboard_service::{DashboardService, DashboardView},
    quiz_session::QuizSession,
    quote_service::{QuoteService, RefreshReport},
};
use sources::traits::PortfolioSource;
use tracing::{info, warn};

use errors::CoreError;

/// Main entry point for the finlearn core library.
/// Holds the course content, quiz progress, simulator and notifications.
#[must_use]
pub struct Academy {
    settings: Settings,
    content: CourseContent,
    quiz: QuizSession,
    quotes: QuoteBoard,
    portfolio: Box<dyn PortfolioSource>,
    quote_service: QuoteService,
    dashboard_service: DashboardService,
    notifications: NotificationCenter,
    /// Non-trade activity (lessons, quizzes) for the dashboard feed.
    activity: Vec<ActivityItem>,
}

impl std::fmt::Debug for Academy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Academy")
            .field("mode", &self.portfolio.mode())
            .field("lessons", &self.content.lessons.len())
            .field("questions", &self.content.questions.len())
            .field("quotes", &self.quotes.len())
            .field("notifications", &self.notifications.active().len())
            .finish()
    }
}

impl Academy {
    /// Build an academy with the portfolio source chosen by `settings`.
    pub fn new(settings: Settings, content: CourseContent) -> Result<Self, CoreError> {
        settings.validate()?;
        let portfolio = sources::build_source(&settings, &content.quotes)?;
        Self::with_portfolio_source(settings, content, portfolio)
    }

    /// Bundled course data with default settings (remote backend).
    pub fn with_defaults() -> Result<Self, CoreError> {
        Self::new(Settings::default(), CourseContent::bundled()?)
    }

    /// Offline/demo academy: bundled content, local ledger.
    pub fn demo() -> Result<Self, CoreError> {
        let settings = Settings {
            portfolio_mode: PortfolioMode::Local,
            ..Settings::default()
        };
        Self::new(settings, CourseContent::bundled()?)
    }

    /// Build with an explicit portfolio source (custom backends, tests).
    pub fn with_portfolio_source(
        settings: Settings,
        content: CourseContent,
        portfolio: Box<dyn PortfolioSource>,
    ) -> Result<Self, CoreError> {
        content.validate()?;
        let quiz = QuizSession::new(content.questions.clone())?;
        let quotes = content.quotes.clone();
        info!(mode = %portfolio.mode(), source = portfolio.name(), "academy ready");
        Ok(Self {
            settings,
            content,
            quiz,
            quotes,
            portfolio,
            quote_service: QuoteService::new(),
            dashboard_service: DashboardService::new(),
            notifications: NotificationCenter::new(),
            activity: Vec::new(),
        })
    }

    #[must_use]
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    #[must_use]
    pub fn portfolio_mode(&self) -> PortfolioMode {
        self.portfolio.mode()
    }

    // ── Lessons ─────────────────────────────────────────────────────

    #[must_use]
    pub fn lessons(&self) -> &[Lesson] {
        &self.content.lessons
    }

    /// Search by title/description and filter by difficulty.
    #[must_use]
    pub fn search_lessons(&self, query: &str, filter: DifficultyFilter) -> Vec<&Lesson> {
        catalog_service::filter_lessons(&self.content.lessons, query, filter)
    }

    #[must_use]
    pub fn lesson_stats(&self) -> LessonStats {
        catalog_service::lesson_stats(&self.content.lessons)
    }

    // ── Quiz ────────────────────────────────────────────────────────

    #[must_use]
    pub fn quiz(&self) -> &QuizSession {
        &self.quiz
    }

    #[must_use]
    pub fn current_question(&self) -> Option<&Question> {
        self.quiz.current_question()
    }

    /// Answer the current question. Finishing the quiz adds an entry to
    /// the dashboard activity feed.
    pub fn answer_question(&mut self, option_id: &str) -> Result<AnswerFeedback, CoreError> {
        let feedback = self.quiz.answer(option_id)?;
        if let Some(result) = self.quiz.result() {
            self.activity.push(ActivityItem {
                kind: ActivityKind::Quiz,
                title: format!("Scored {}% on the investing quiz", result.percentage),
                at: Utc::now(),
            });
        }
        Ok(feedback)
    }

    #[must_use]
    pub fn quiz_result(&self) -> Option<QuizResult> {
        self.quiz.result()
    }

    pub fn reset_quiz(&mut self) {
        self.quiz.reset();
    }

    // ── Market Data ─────────────────────────────────────────────────

    #[must_use]
    pub fn quotes(&self) -> &QuoteBoard {
        &self.quotes
    }

    /// The first `market_watch_size` quotes.
    #[must_use]
    pub fn market_watch(&self) -> &[StockQuote] {
        self.quotes.market_watch(self.settings.market_watch_size)
    }

    /// Replace the quote board with fresh prices from `provider` and mark
    /// the portfolio to market.
    pub async fn refresh_quotes(&mut self, provider: &dyn QuoteProvider) -> RefreshReport {
        let (board, report) = self.quote_service.refresh(&self.quotes, provider).await;
        if !report.stale.is_empty() {
            self.notifications.push(Notification::new(
                "Market Data Unavailable",
                format!("Could not refresh {}.", report.stale.join(", ")),
                Severity::Info,
            ));
        }
        self.portfolio.update_quotes(&board);
        self.quotes = board;
        report
    }

    // ── Simulator ───────────────────────────────────────────────────

    /// Current cash and holdings from the active portfolio source.
    pub async fn portfolio_snapshot(&self) -> Result<PortfolioSnapshot, CoreError> {
        self.portfolio.snapshot().await
    }

    /// Validate and submit a trade form, then refetch the portfolio.
    ///
    /// Every outcome is also pushed to the notification center. Validation
    /// failures never reach the portfolio source; on any error the previous
    /// state is left untouched. Once the source accepts the order the call
    /// succeeds, and a failed refetch is reported through
    /// [`TradeOutcome::snapshot`] instead.
    pub async fn submit_trade(&mut self, form: &TradeForm) -> Result<TradeOutcome, CoreError> {
        let order = match self.try_execute(form).await {
            Ok(order) => order,
            Err(e) => {
                warn!(error = %e, "trade not executed");
                self.notifications.push(Notification::from_error(&e));
                return Err(e);
            }
        };

        self.notifications.push(Notification::success(
            "Trade Executed",
            format!(
                "Successfully {} {} shares of {}.",
                order.action.past_tense(),
                order.quantity,
                order.symbol
            ),
        ));

        let snapshot = self.portfolio.snapshot().await;
        if let Err(e) = &snapshot {
            warn!(error = %e, symbol = %order.symbol, "portfolio refresh failed after trade");
            self.notifications.push(Notification::new(
                "Portfolio Not Refreshed",
                "Your trade went through, but the latest portfolio could not be loaded.",
                Severity::Info,
            ));
        }
        Ok(TradeOutcome { order, snapshot })
    }

    async fn try_execute(&mut self, form: &TradeForm) -> Result<TradeOrder, CoreError> {
        let order = form.parse(&self.quotes)?;
        if order.action == TradeAction::Buy {
            let balance = self.portfolio.snapshot().await?.cash_balance;
            TradeForm::check_affordable(&order, &self.quotes, balance)?;
        }

        self.portfolio.execute(&order).await?;
        Ok(order)
    }

    // ── Dashboard ───────────────────────────────────────────────────

    #[must_use]
    pub fn badges(&self) -> &[Badge] {
        &self.content.badges
    }

    /// Record a completed lesson in the activity feed.
    pub fn record_lesson_completed(&mut self, lesson_id: u32) -> Result<(), CoreError> {
        let lesson = self
            .content
            .lessons
            .iter_mut()
            .find(|l| l.id == lesson_id)
            .ok_or_else(|| CoreError::ValidationError(format!("Unknown lesson {lesson_id}")))?;
        lesson.progress = 100;
        lesson.completed = true;
        self.activity.push(ActivityItem {
            kind: ActivityKind::Lesson,
            title: format!("Completed \"{}\"", lesson.title),
            at: Utc::now(),
        });
        Ok(())
    }

    #[must_use]
    pub fn dashboard(&self) -> DashboardView {
        self.dashboard_service.build(
            &self.content.profile,
            &self.content.badges,
            &self.content.goals,
            self.portfolio.history(),
            &self.activity,
        )
    }

    // ── Notifications ───────────────────────────────────────────────

    #[must_use]
    pub fn notifications(&self) -> &[Notification] {
        self.notifications.active()
    }

    pub fn dismiss_notification(&mut self, id: uuid::Uuid) -> bool {
        self.notifications.dismiss(id)
    }

    pub fn clear_notifications(&mut self) {
        self.notifications.clear();
    }
}
