mod submission_dto;

pub use submission_dto::{
    SubmissionFile, SubmissionForm, SubmissionResponseDto, UploadReportDto,
};
