mod config_dto;

pub use config_dto::{
    ConfigResponseDto, ReportEmailEntryDto, UpdateConfigDto, UpdateConfigResponseDto,
};
