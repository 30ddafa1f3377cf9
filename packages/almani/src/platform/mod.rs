// Platform 模块 - 宿主相关能力

pub mod tts;
