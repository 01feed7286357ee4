/// 程序配置文件
#[derive(Clone, Debug)]
pub struct Config {
    /// Cookie 文件路径
    pub cookie_file: String,
    /// TikTok 首页地址
    pub home_url: String,
    /// TikTok 上传页地址
    pub upload_url: String,
    /// 浏览器 User-Agent
    pub user_agent: String,
    /// 浏览器可执行文件路径（为空则自动探测）
    pub chrome_executable: String,
    /// 页面加载后的固定等待（秒）
    pub page_settle_secs: u64,
    /// 登录状态探测的单个选择器超时（秒）
    pub probe_timeout_secs: u64,
    /// 登录后确认上传页可用的超时（秒）
    pub login_verify_timeout_secs: u64,
    /// 等待文件上传控件的超时（秒）
    pub file_input_timeout_secs: u64,
    /// 视频处理等待上限（秒）
    pub processing_wait_secs: u64,
    /// 查找文案编辑框的单个选择器超时（秒）
    pub caption_editor_timeout_secs: u64,
    /// 等待发布按钮的超时（秒）
    pub publish_button_timeout_secs: u64,
    /// 点击发布后的固定等待（秒）
    pub post_settle_secs: u64,
    /// 手动登录轮询间隔（秒）
    pub login_poll_interval_secs: u64,
    /// 手动登录轮询次数上限
    pub login_max_attempts: usize,
    /// 文案最大长度（字符数）
    pub caption_max_chars: usize,
    /// 是否显示详细日志
    pub verbose_logging: bool,
    /// 输出日志文件
    pub output_log_file: String,
    // --- LLM 配置 ---
    pub llm_api_key: String,
    pub llm_api_base_url: String,
    pub llm_model_name: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cookie_file: "config/cookies.json".to_string(),
            home_url: "https://www.tiktok.com".to_string(),
            upload_url: "https://www.tiktok.com/upload".to_string(),
            user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
                         (KHTML, like Gecko) Chrome/122.0.0.0 Safari/537.36"
                .to_string(),
            chrome_executable: String::new(),
            page_settle_secs: 5,
            probe_timeout_secs: 3,
            login_verify_timeout_secs: 10,
            file_input_timeout_secs: 20,
            processing_wait_secs: 15,
            caption_editor_timeout_secs: 5,
            publish_button_timeout_secs: 10,
            post_settle_secs: 5,
            login_poll_interval_secs: 5,
            login_max_attempts: 60,
            caption_max_chars: 200,
            verbose_logging: false,
            output_log_file: "upload_log.txt".to_string(),
            llm_api_key: String::new(),
            llm_api_base_url: "https://generativelanguage.googleapis.com/v1beta/openai"
                .to_string(),
            llm_model_name: "gemini-1.5-flash".to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let default = Self::default();
        Self {
            cookie_file: std::env::var("COOKIE_FILE").unwrap_or(default.cookie_file),
            home_url: std::env::var("HOME_URL").unwrap_or(default.home_url),
            upload_url: std::env::var("UPLOAD_URL").unwrap_or(default.upload_url),
            user_agent: std::env::var("USER_AGENT").unwrap_or(default.user_agent),
            chrome_executable: std::env::var("CHROME_EXECUTABLE").unwrap_or(default.chrome_executable),
            page_settle_secs: std::env::var("PAGE_SETTLE_SECS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.page_settle_secs),
            probe_timeout_secs: std::env::var("PROBE_TIMEOUT_SECS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.probe_timeout_secs),
            login_verify_timeout_secs: std::env::var("LOGIN_VERIFY_TIMEOUT_SECS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.login_verify_timeout_secs),
            file_input_timeout_secs: std::env::var("FILE_INPUT_TIMEOUT_SECS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.file_input_timeout_secs),
            processing_wait_secs: std::env::var("PROCESSING_WAIT_SECS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.processing_wait_secs),
            caption_editor_timeout_secs: std::env::var("CAPTION_EDITOR_TIMEOUT_SECS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.caption_editor_timeout_secs),
            publish_button_timeout_secs: std::env::var("PUBLISH_BUTTON_TIMEOUT_SECS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.publish_button_timeout_secs),
            post_settle_secs: std::env::var("POST_SETTLE_SECS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.post_settle_secs),
            login_poll_interval_secs: std::env::var("LOGIN_POLL_INTERVAL_SECS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.login_poll_interval_secs),
            login_max_attempts: std::env::var("LOGIN_MAX_ATTEMPTS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.login_max_attempts),
            caption_max_chars: std::env::var("CAPTION_MAX_CHARS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.caption_max_chars),
            verbose_logging: std::env::var("VERBOSE_LOGGING").ok().and_then(|v| v.parse().ok()).unwrap_or(default.verbose_logging),
            output_log_file: std::env::var("OUTPUT_LOG_FILE").unwrap_or(default.output_log_file),
            llm_api_key: std::env::var("LLM_API_KEY").unwrap_or(default.llm_api_key),
            llm_api_base_url: std::env::var("LLM_API_BASE_URL").unwrap_or(default.llm_api_base_url),
            llm_model_name: std::env::var("LLM_MODEL_NAME").unwrap_or(default.llm_model_name),
        }
    }

    /// 是否配置了 LLM 凭证
    pub fn has_llm_credentials(&self) -> bool {
        !self.llm_api_key.trim().is_empty()
    }
}
