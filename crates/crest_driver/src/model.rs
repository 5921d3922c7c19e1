//! Surface Model
//!
//! 曲面设置存储：取值范围、动画时间、表达式和播放状态。
//! 每次成功修改都会先派发对应事件，再派发 [`ModelEvent::Any`]。

use std::sync::Arc;

use crest_codegen::Evaluator;
use thiserror::Error;

use crate::error::Error;

/// 默认曲面：若干正余弦波叠加
pub const DEFAULT_FUNC: &str = "0.5 + (sin(2 * ((y + x) + t * pi / 3)) \
+ cos(2 * ((y - x) + t * pi / 5)) \
+ sin(2 * (y + t * pi / 7)) \
+ cos(2 * (x + t * pi / 11)) \
+ sin(2 * (y + t * pi / 17)) \
+ cos(2 * (x + t * pi / 13))) / 12";

/// min / max 的取值范围
pub const RANGE_LIMIT: f64 = 1000.0;
/// time 的上限（秒）
pub const TIME_LIMIT: f64 = 600.0;
/// 每个轴上的网格格数
pub const GRID_CELLS: usize = 50;

/// 设置存储的错误
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ModelError {
    #[error("Not a number")]
    NotANumber,

    #[error("Range must be between [-1000, 1000]")]
    RangeOutOfBounds,

    #[error("Time must be between [0, 600]")]
    TimeOutOfBounds,

    /// 表达式无法解析或编译，旧表达式保持不变
    #[error("{0}")]
    InvalidFunc(#[from] Error),

    #[error("Running already")]
    RunningAlready,

    #[error("Cannot pause when stopped")]
    PauseWhenStopped,

    #[error("Stopped already")]
    StoppedAlready,
}

/// 变更事件
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModelEvent {
    Min,
    Max,
    Func,
    Time,
    Running,
    Paused,
    /// 每次成功修改的最后一个事件
    Any,
}

/// 监听器句柄，用于 [`SurfaceModel::unlisten`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(usize);

type Listener = Box<dyn FnMut(ModelEvent) + Send>;

/// 初始设置
#[derive(Debug, Clone, PartialEq)]
pub struct ModelSettings {
    pub min: f64,
    pub max: f64,
    pub func: String,
    pub time: f64,
}

impl Default for ModelSettings {
    fn default() -> Self {
        Self {
            min: -5.0,
            max: 5.0,
            func: DEFAULT_FUNC.to_string(),
            time: 0.0,
        }
    }
}

/// 曲面设置存储
pub struct SurfaceModel {
    min: f64,
    max: f64,
    time: f64,
    func: String,
    evaluator: Arc<Evaluator>,
    running: bool,
    paused: bool,
    listeners: Vec<(ListenerId, Listener)>,
    next_listener: usize,
}

impl SurfaceModel {
    /// 校验每一项设置后创建
    pub fn new(settings: ModelSettings) -> Result<Self, ModelError> {
        let min = check_range(settings.min)?;
        let max = check_range(settings.max)?;
        let time = check_time(settings.time)?;
        let evaluator = crate::compile(&settings.func)?;

        Ok(Self {
            min,
            max,
            time,
            func: settings.func,
            evaluator: Arc::new(evaluator),
            running: false,
            paused: false,
            listeners: Vec::new(),
            next_listener: 0,
        })
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    pub fn time(&self) -> f64 {
        self.time
    }

    pub fn func(&self) -> &str {
        &self.func
    }

    /// 网格间距
    pub fn step(&self) -> f64 {
        (self.max - self.min) / GRID_CELLS as f64
    }

    /// 当前求值器
    ///
    /// 返回的 `Arc` 在之后的 [`SurfaceModel::set_func`] 中不受影响。
    pub fn evaluator(&self) -> Arc<Evaluator> {
        Arc::clone(&self.evaluator)
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn set_min(&mut self, min: f64) -> Result<(), ModelError> {
        self.min = check_range(min).inspect_err(|err| log::warn!("min rejected: {err}"))?;
        self.dispatch(ModelEvent::Min);
        self.dispatch(ModelEvent::Any);
        Ok(())
    }

    pub fn set_max(&mut self, max: f64) -> Result<(), ModelError> {
        self.max = check_range(max).inspect_err(|err| log::warn!("max rejected: {err}"))?;
        self.dispatch(ModelEvent::Max);
        self.dispatch(ModelEvent::Any);
        Ok(())
    }

    pub fn set_time(&mut self, time: f64) -> Result<(), ModelError> {
        self.time = check_time(time).inspect_err(|err| log::warn!("time rejected: {err}"))?;
        self.dispatch(ModelEvent::Time);
        self.dispatch(ModelEvent::Any);
        Ok(())
    }

    /// 解析并编译新表达式
    ///
    /// 失败时保留原有表达式和求值器。
    pub fn set_func(&mut self, func: &str) -> Result<(), ModelError> {
        let evaluator = match crate::compile(func) {
            Ok(evaluator) => evaluator,
            Err(err) => {
                log::warn!("func rejected: {err}");
                return Err(err.into());
            }
        };

        for warning in evaluator.warnings() {
            let diag = warning.to_diagnostic();
            log::log!(diag.level.log_level(), "{diag}");
        }
        self.evaluator = Arc::new(evaluator);
        self.func = func.to_string();
        log::info!("surface function replaced: {func}");
        self.dispatch(ModelEvent::Func);
        self.dispatch(ModelEvent::Any);
        Ok(())
    }

    /// 开始播放，或从暂停中恢复
    pub fn start(&mut self) -> Result<(), ModelError> {
        if self.running && !self.paused {
            return Err(ModelError::RunningAlready);
        }
        if !self.running {
            self.running = true;
            self.dispatch(ModelEvent::Running);
        }
        if self.paused {
            self.paused = false;
            self.dispatch(ModelEvent::Paused);
        }
        self.dispatch(ModelEvent::Any);
        Ok(())
    }

    /// 切换暂停状态
    pub fn pause(&mut self) -> Result<(), ModelError> {
        if !self.running {
            return Err(ModelError::PauseWhenStopped);
        }
        self.paused = !self.paused;
        self.dispatch(ModelEvent::Paused);
        self.dispatch(ModelEvent::Any);
        Ok(())
    }

    pub fn stop(&mut self) -> Result<(), ModelError> {
        if !self.running {
            return Err(ModelError::StoppedAlready);
        }
        self.running = false;
        self.dispatch(ModelEvent::Running);
        if self.paused {
            self.paused = false;
            self.dispatch(ModelEvent::Paused);
        }
        self.dispatch(ModelEvent::Any);
        Ok(())
    }

    /// 注册监听器
    pub fn listen<F>(&mut self, listener: F) -> ListenerId
    where
        F: FnMut(ModelEvent) + Send + 'static,
    {
        let id = ListenerId(self.next_listener);
        self.next_listener += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// 移除监听器，返回是否找到
    pub fn unlisten(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(listener, _)| *listener != id);
        self.listeners.len() != before
    }

    fn dispatch(&mut self, event: ModelEvent) {
        for (_, listener) in self.listeners.iter_mut() {
            listener(event);
        }
    }
}

impl std::fmt::Debug for SurfaceModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SurfaceModel")
            .field("min", &self.min)
            .field("max", &self.max)
            .field("time", &self.time)
            .field("func", &self.func)
            .field("running", &self.running)
            .field("paused", &self.paused)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

fn check_range(value: f64) -> Result<f64, ModelError> {
    if value.is_nan() {
        return Err(ModelError::NotANumber);
    }
    if !(-RANGE_LIMIT..=RANGE_LIMIT).contains(&value) {
        return Err(ModelError::RangeOutOfBounds);
    }
    Ok(value)
}

fn check_time(value: f64) -> Result<f64, ModelError> {
    if value.is_nan() {
        return Err(ModelError::NotANumber);
    }
    if !(0.0..=TIME_LIMIT).contains(&value) {
        return Err(ModelError::TimeOutOfBounds);
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    fn recorder(model: &mut SurfaceModel) -> (ListenerId, Arc<Mutex<Vec<ModelEvent>>>) {
        let events = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&events);
        let id = model.listen(move |event| sink.lock().unwrap().push(event));
        (id, events)
    }

    #[test]
    fn test_default_settings() {
        let model = SurfaceModel::new(ModelSettings::default()).unwrap();
        assert_eq!(model.min(), -5.0);
        assert_eq!(model.max(), 5.0);
        assert_eq!(model.step(), 0.2);
        assert!(!model.is_running());
        assert!(model.evaluator().is_deterministic());
    }

    #[test]
    fn test_default_func_value() {
        let model = SurfaceModel::new(ModelSettings::default()).unwrap();
        // t = 0, x = y = 0: 0.5 + (0 + 1 + 0 + 1 + 0 + 1) / 12
        assert!((model.evaluator().eval(0.0, 0.0, 0.0) - 0.75).abs() < 1e-12);
    }

    #[test]
    fn test_invalid_settings() {
        let settings = ModelSettings {
            min: f64::NAN,
            ..ModelSettings::default()
        };
        assert_eq!(SurfaceModel::new(settings).unwrap_err(), ModelError::NotANumber);

        let settings = ModelSettings {
            func: "1 +".to_string(),
            ..ModelSettings::default()
        };
        assert!(matches!(
            SurfaceModel::new(settings),
            Err(ModelError::InvalidFunc(_))
        ));
    }

    #[test]
    fn test_range_validation() {
        let mut model = SurfaceModel::new(ModelSettings::default()).unwrap();
        assert_eq!(model.set_min(f64::NAN), Err(ModelError::NotANumber));
        assert_eq!(model.set_max(1000.5), Err(ModelError::RangeOutOfBounds));
        assert_eq!(
            model.set_min(-1001.0).unwrap_err().to_string(),
            "Range must be between [-1000, 1000]"
        );
        assert_eq!(model.min(), -5.0);

        model.set_min(-1000.0).unwrap();
        model.set_max(1000.0).unwrap();
        assert_eq!(model.step(), 40.0);
    }

    #[test]
    fn test_time_validation() {
        let mut model = SurfaceModel::new(ModelSettings::default()).unwrap();
        assert_eq!(model.set_time(-0.1), Err(ModelError::TimeOutOfBounds));
        assert_eq!(model.set_time(600.1), Err(ModelError::TimeOutOfBounds));
        model.set_time(600.0).unwrap();
        assert_eq!(model.time(), 600.0);
    }

    #[test]
    fn test_set_func_keeps_old_on_error() {
        let mut model = SurfaceModel::new(ModelSettings::default()).unwrap();
        model.set_func("x + y").unwrap();
        let err = model.set_func("x + bogus").unwrap_err();
        assert!(err.to_string().contains("bogus"));
        assert_eq!(model.func(), "x + y");
        assert_eq!(model.evaluator().eval(1.0, 2.0, 0.0), 3.0);
    }

    #[test]
    fn test_set_func_accepts_warnings() {
        let mut model = SurfaceModel::new(ModelSettings::default()).unwrap();
        model.set_func("let unused = 1 in x").unwrap();
        assert_eq!(model.func(), "let unused = 1 in x");
        let evaluator = model.evaluator();
        assert_eq!(evaluator.warnings().len(), 1);
        assert_eq!(
            evaluator.warnings()[0].to_diagnostic().to_string(),
            "warning: unused binding 'unused' (at 4..10)"
        );
        assert_eq!(evaluator.eval(3.0, 0.0, 0.0), 3.0);
    }

    #[test]
    fn test_set_func_leaves_old_readers_alone() {
        let mut model = SurfaceModel::new(ModelSettings::default()).unwrap();
        model.set_func("1").unwrap();
        let before = model.evaluator();
        model.set_func("2").unwrap();
        assert_eq!(before.eval(0.0, 0.0, 0.0), 1.0);
        assert_eq!(model.evaluator().eval(0.0, 0.0, 0.0), 2.0);
    }

    #[test]
    fn test_events() {
        let mut model = SurfaceModel::new(ModelSettings::default()).unwrap();
        let (_, events) = recorder(&mut model);

        model.set_min(-2.0).unwrap();
        model.set_func("x").unwrap();
        let _ = model.set_time(-1.0);
        assert_eq!(
            *events.lock().unwrap(),
            vec![
                ModelEvent::Min,
                ModelEvent::Any,
                ModelEvent::Func,
                ModelEvent::Any
            ]
        );
    }

    #[test]
    fn test_unlisten() {
        let mut model = SurfaceModel::new(ModelSettings::default()).unwrap();
        let (id, events) = recorder(&mut model);
        assert!(model.unlisten(id));
        assert!(!model.unlisten(id));
        model.set_max(3.0).unwrap();
        assert!(events.lock().unwrap().is_empty());
    }

    #[test]
    fn test_play_state_machine() {
        let mut model = SurfaceModel::new(ModelSettings::default()).unwrap();
        assert_eq!(model.pause(), Err(ModelError::PauseWhenStopped));
        assert_eq!(model.stop(), Err(ModelError::StoppedAlready));

        model.start().unwrap();
        assert!(model.is_running());
        assert_eq!(model.start(), Err(ModelError::RunningAlready));

        model.pause().unwrap();
        assert!(model.is_paused());
        model.pause().unwrap();
        assert!(!model.is_paused());

        model.pause().unwrap();
        model.start().unwrap();
        assert!(model.is_running() && !model.is_paused());

        model.stop().unwrap();
        assert!(!model.is_running());
    }

    #[test]
    fn test_play_events() {
        let mut model = SurfaceModel::new(ModelSettings::default()).unwrap();
        model.start().unwrap();
        model.pause().unwrap();
        let (_, events) = recorder(&mut model);

        model.stop().unwrap();
        assert_eq!(
            *events.lock().unwrap(),
            vec![ModelEvent::Running, ModelEvent::Paused, ModelEvent::Any]
        );
    }
}
